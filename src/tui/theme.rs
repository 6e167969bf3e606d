//! Theme system for TUI colors and styles
//!
//! Colors line up with the CLI output in `commands/`, so a status reads the
//! same in `ls` and in the browser.

use iocraft::prelude::Color;

use crate::list::CellTone;

const GRAY: Color = Color::Rgb {
    r: 120,
    g: 120,
    b: 120,
};

/// Theme configuration for TUI components
#[derive(Debug, Clone)]
pub struct Theme {
    // Cell tones
    pub tone_normal: Color,
    pub tone_muted: Color,
    pub tone_accent: Color,
    pub tone_success: Color,
    pub tone_warning: Color,
    pub tone_danger: Color,

    // UI colors
    pub border: Color,
    pub border_focused: Color,
    pub background: Color,
    pub text: Color,
    pub text_dimmed: Color,
    pub highlight: Color,
    pub selected_row: Color,
    pub header_text: Color,
    pub sort_indicator: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            tone_normal: Color::White,
            tone_muted: GRAY,
            tone_accent: Color::Cyan,
            tone_success: Color::Green,
            tone_warning: Color::Yellow,
            tone_danger: Color::Red,

            border: GRAY,
            border_focused: Color::Blue,
            background: Color::Reset,
            text: Color::White,
            text_dimmed: GRAY,
            highlight: Color::Blue,
            selected_row: Color::Rgb {
                r: 40,
                g: 60,
                b: 110,
            },
            header_text: Color::Cyan,
            sort_indicator: Color::Yellow,
        }
    }
}

impl Theme {
    /// Get the color for a cell tone
    pub fn tone_color(&self, tone: CellTone) -> Color {
        match tone {
            CellTone::Normal => self.tone_normal,
            CellTone::Muted => self.tone_muted,
            CellTone::Accent => self.tone_accent,
            CellTone::Success => self.tone_success,
            CellTone::Warning => self.tone_warning,
            CellTone::Danger => self.tone_danger,
        }
    }
}

/// Global theme instance
pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);

/// Get a reference to the global theme
pub fn theme() -> &'static Theme {
    &THEME
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_colors() {
        let theme = theme();
        assert!(matches!(theme.tone_color(CellTone::Danger), Color::Red));
        assert!(matches!(theme.tone_color(CellTone::Success), Color::Green));
        assert!(matches!(
            theme.tone_color(CellTone::Muted),
            Color::Rgb {
                r: 120,
                g: 120,
                b: 120
            }
        ));
    }
}
