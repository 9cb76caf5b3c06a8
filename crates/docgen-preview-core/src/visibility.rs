//! Collapsed/expanded state of a preview panel.

/// Whether a preview's content region is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PreviewVisibility {
    #[default]
    Expanded,
    Collapsed,
}

impl PreviewVisibility {
    /// Derive the state from the content region's CSS `display` value.
    ///
    /// Only an explicit `none` counts as collapsed.
    pub fn from_display(display: &str) -> Self {
        if display.trim() == "none" {
            PreviewVisibility::Collapsed
        } else {
            PreviewVisibility::Expanded
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            PreviewVisibility::Expanded => PreviewVisibility::Collapsed,
            PreviewVisibility::Collapsed => PreviewVisibility::Expanded,
        }
    }

    pub fn toggle(&mut self) {
        *self = self.toggled();
    }

    pub fn is_expanded(self) -> bool {
        self == PreviewVisibility::Expanded
    }

    /// CSS `display` value for the content region.
    pub fn display(self) -> &'static str {
        match self {
            PreviewVisibility::Expanded => "block",
            PreviewVisibility::Collapsed => "none",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            PreviewVisibility::Expanded => "▼",
            PreviewVisibility::Collapsed => "▶",
        }
    }

    /// Button label: what clicking it will do.
    pub fn label(self) -> &'static str {
        match self {
            PreviewVisibility::Expanded => "Свернуть",
            PreviewVisibility::Collapsed => "Развернуть",
        }
    }

    /// Inner markup of the toggle button.
    pub fn button_markup(self) -> String {
        format!(
            r#"<span class="preview-icon">{}</span> {}"#,
            self.icon(),
            self.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_state() {
        for start in [PreviewVisibility::Expanded, PreviewVisibility::Collapsed] {
            let mut state = start;
            let label = state.button_markup();
            state.toggle();
            assert_ne!(state, start);
            assert_ne!(state.button_markup(), label);
            state.toggle();
            assert_eq!(state, start);
            assert_eq!(state.button_markup(), label);
        }
    }

    #[test]
    fn test_labels() {
        let collapsed = PreviewVisibility::Collapsed;
        assert_eq!(collapsed.display(), "none");
        assert_eq!(
            collapsed.button_markup(),
            r#"<span class="preview-icon">▶</span> Развернуть"#
        );
        assert!(PreviewVisibility::default().is_expanded());
    }

    #[test]
    fn test_from_display() {
        assert_eq!(PreviewVisibility::from_display("none"), PreviewVisibility::Collapsed);
        assert_eq!(PreviewVisibility::from_display(""), PreviewVisibility::Expanded);
        assert_eq!(PreviewVisibility::from_display("block"), PreviewVisibility::Expanded);
    }
}
