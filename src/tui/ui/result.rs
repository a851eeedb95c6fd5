//! Risk verdict banner.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::Assessment;
use crate::tui::styles::MedicalTheme;

/// Render the verdict for the last submission with the download hint.
pub fn render_result(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let prediction = assessment.prediction;
    let icon = if prediction.is_high_risk() { "!" } else { "OK" };

    let content = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{icon} {}", prediction.headline()),
            MedicalTheme::verdict_headline(prediction),
        )),
        Line::from(Span::styled(prediction.advice(), MedicalTheme::text())),
        Line::from(""),
        Line::from(vec![
            Span::styled("[D] ", MedicalTheme::key_hint()),
            Span::styled("Download Full Report", MedicalTheme::key_desc()),
        ]),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(MedicalTheme::verdict(prediction)),
    );

    f.render_widget(content, area);
}
