//! ANSI styling for the run report.
//!
//! Color scheme:
//! - Bold blue for document names (the thing you scan for)
//! - Green/yellow/red for ROUGE scores by quality band
//! - Dimmed for metadata (timings, placeholders, separators)
//!
//! Styling is applied only when the palette is enabled, so the same
//! rendering code produces plain text for pipes and files.

use owo_colors::{OwoColorize, Style};

/// F-measure at or above which a score is rendered as good.
const GOOD_SCORE: f64 = 0.5;
/// F-measure below which a score is rendered as poor.
const POOR_SCORE: f64 = 0.2;

/// Style set with an on/off switch.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    /// Apply `style` when enabled, otherwise return the text untouched.
    pub fn paint(&self, s: &str, style: Style) -> String {
        if self.enabled {
            s.style(style).to_string()
        } else {
            s.to_string()
        }
    }

    /// Document file name (bold blue)
    pub fn file_name(&self, s: &str) -> String {
        self.paint(s, Style::new().bright_blue().bold())
    }

    /// Section header (bold)
    pub fn header(&self, s: &str) -> String {
        self.paint(s, Style::new().bold())
    }

    /// Secondary information
    pub fn dim(&self, s: &str) -> String {
        self.paint(s, Style::new().dimmed())
    }

    pub fn error(&self, s: &str) -> String {
        self.paint(s, Style::new().bright_red())
    }

    /// An already formatted score, colored by the quality of `value`.
    pub fn score(&self, s: &str, value: f64) -> String {
        let style = if value >= GOOD_SCORE {
            Style::new().green()
        } else if value < POOR_SCORE {
            Style::new().red()
        } else {
            Style::new().yellow()
        };
        self.paint(s, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_palette_is_identity() {
        let palette = Palette::plain();
        assert_eq!(palette.file_name("a.json"), "a.json");
        assert_eq!(palette.score("0.900", 0.9), "0.900");
        assert_eq!(palette.dim("-"), "-");
    }

    #[test]
    fn test_enabled_palette_emits_ansi() {
        let palette = Palette::new(true);
        let styled = palette.file_name("a.json");
        assert!(styled.contains("a.json"));
        assert!(styled.contains('\x1b'));
        assert_ne!(palette.score("0.1", 0.1), palette.score("0.1", 0.9));
    }
}
