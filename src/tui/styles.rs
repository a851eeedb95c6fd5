//! HeartGuard color palette and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::PredictionResult;

/// Medical theme color palette.
pub struct MedicalTheme;

impl MedicalTheme {
    // === Primary Colors ===

    /// Action blue for the submit button and focus
    pub const PRIMARY: Color = Color::Rgb(0, 123, 255); // #007BFF

    /// Lighter blue for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(96, 165, 250); // #60A5FA

    /// Pressed-button blue
    pub const PRIMARY_DARK: Color = Color::Rgb(0, 86, 179); // #0056B3

    /// Light slate for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Verdict Colors ===

    /// Low risk banner
    pub const SUCCESS: Color = Color::Rgb(104, 211, 145); // #68D391

    /// High risk banner
    pub const DANGER: Color = Color::Rgb(252, 129, 129); // #FC8181

    /// Amber - Warning
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24

    /// Glossary and info panels
    pub const INFO: Color = Color::Rgb(59, 130, 246); // #3B82F6

    /// Text drawn on a filled highlight
    pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // #0F172A

    // === Text Colors ===

    /// Primary text (white)
    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC

    /// Secondary text (gray)
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8

    /// Muted text
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    // === Preset Styles ===

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    /// Style for the focused submit button
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for focused elements
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Style for the page header
    #[must_use]
    pub fn header() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY_DARK)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key hints
    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key descriptions
    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Verdict colour: rose for high risk, green for low risk.
    #[must_use]
    pub fn verdict(prediction: PredictionResult) -> Style {
        match prediction {
            PredictionResult::HighRisk => Self::danger(),
            PredictionResult::LowRisk => Self::success(),
        }
    }

    /// Bold verdict headline on a dark fill.
    #[must_use]
    pub fn verdict_headline(prediction: PredictionResult) -> Style {
        Self::verdict(prediction)
            .bg(Self::BG_DARK)
            .add_modifier(Modifier::BOLD)
    }

    /// Status line style for a message kind.
    #[must_use]
    pub fn status(kind: StatusKind) -> Style {
        match kind {
            StatusKind::Success => Self::success(),
            StatusKind::Warning => Self::warning(),
            StatusKind::Error => Self::danger(),
        }
    }
}

/// Severity of a status line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Warning,
    Error,
}
