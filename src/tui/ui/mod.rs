//! UI module: View components for the TUI.

pub mod form;
pub mod result;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::{MedicalTheme, StatusKind};

pub fn render_header(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![
            Span::styled(" HeartGuard AI ", MedicalTheme::header()),
            Span::styled(" Professional Heart Risk Assessment", MedicalTheme::subtitle()),
        ]),
        Line::from(Span::styled(
            " Enter patient clinical data below. The focused field's explanation is shown at the bottom.",
            MedicalTheme::text_secondary(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(MedicalTheme::border());

    f.render_widget(Paragraph::new(text).block(block), area);
}

pub fn render_glossary(f: &mut Frame, area: Rect) {
    let entry = |term: &'static str, meaning: &'static str| {
        vec![
            Line::from(vec![
                Span::styled(term, MedicalTheme::focused()),
                Span::styled(" ", MedicalTheme::text()),
                Span::styled(meaning, MedicalTheme::text()),
            ]),
            Line::from(""),
        ]
    };

    let text: Vec<Line> = [
        ("BP:", "Blood Pressure"),
        ("ECG:", "Electrocardiogram (Heart electric activity)"),
        ("Angina:", "Chest pain caused by reduced blood flow to the heart."),
        ("Cholesterol:", "A fat-like substance in the blood."),
    ]
    .into_iter()
    .flat_map(|(term, meaning)| entry(term, meaning))
    .collect();

    let block = Block::default()
        .title(Span::styled(" Medical Glossary ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::info());

    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

/// Help for the focused field (or the status message) and key hints.
pub fn render_footer(f: &mut Frame, area: Rect, help: &str, status: Option<(&str, StatusKind)>) {
    let first = match status {
        Some((message, kind)) => Line::from(Span::styled(message, MedicalTheme::status(kind))),
        None => Line::from(Span::styled(help, MedicalTheme::text_secondary())),
    };

    let keys = Line::from(vec![
        Span::styled("[↑↓/Tab] ", MedicalTheme::key_hint()),
        Span::styled("Navigate ", MedicalTheme::key_desc()),
        Span::styled("[←→] ", MedicalTheme::key_hint()),
        Span::styled("Adjust ", MedicalTheme::key_desc()),
        Span::styled("[Enter] ", MedicalTheme::key_hint()),
        Span::styled("Analyze ", MedicalTheme::key_desc()),
        Span::styled("[D] ", MedicalTheme::key_hint()),
        Span::styled("Download ", MedicalTheme::key_desc()),
        Span::styled("[Ctrl-R] ", MedicalTheme::key_hint()),
        Span::styled("Reset ", MedicalTheme::key_desc()),
        Span::styled("[Esc] ", MedicalTheme::key_hint()),
        Span::styled("Quit", MedicalTheme::key_desc()),
    ]);

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    f.render_widget(Paragraph::new(vec![first, keys]).block(block), area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = Line::from(Span::styled(
        "Disclaimer: This tool is for informational purposes only and does not replace professional medical evaluation.",
        MedicalTheme::text_muted(),
    ));

    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), area);
}
