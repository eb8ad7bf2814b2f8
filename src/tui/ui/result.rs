//! Result screen: score, tier, advisory text and matched risk factors.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::Assessment;
use crate::tui::styles::MedicalTheme;

/// Result screen state.
#[derive(Default)]
pub struct ResultState {
    /// The completed assessment being shown
    pub assessment: Option<Assessment>,
    /// Confirmation or error message from the last export
    pub notice: Option<String>,
}

/// Render the assessment result.
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(9),  // Score panel
            Constraint::Min(8),     // Risk factors / screening panels
            Constraint::Length(3),  // Footer
        ])
        .split(area);

    render_header(f, chunks[0], state);

    let Some(assessment) = &state.assessment else {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No assessment available.",
            MedicalTheme::text_muted(),
        )))
        .alignment(Alignment::Center);
        f.render_widget(empty, chunks[1]);
        return;
    };

    render_score_panel(f, chunks[1], assessment);
    render_detail_panels(f, chunks[2], assessment);
    render_footer(f, chunks[3], state);
}

fn render_header(f: &mut Frame, area: Rect, state: &ResultState) {
    let prepared = state
        .assessment
        .as_ref()
        .map(|a| a.created_at.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Risk Estimation Report", MedicalTheme::title()),
        Span::styled(
            format!(" │ Prepared {prepared}"),
            MedicalTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_score_panel(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let report = &assessment.report;

    match (report.fib4_score, report.risk_tier) {
        (Some(score), Some(tier)) => {
            let tier_style = MedicalTheme::risk_tier(tier);
            let block = Block::default()
                .title(Span::styled(" Your FIB-4 Score ", MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(tier_style);

            let mut lines = vec![
                Line::from(Span::styled(
                    format!("{score:.2}"),
                    tier_style.add_modifier(ratatui::style::Modifier::BOLD),
                )),
                Line::from(Span::styled(format!("{tier} RISK"), tier_style)),
                Line::from(""),
                Line::from(Span::styled(tier.description(), MedicalTheme::text())),
            ];
            if let Some(bmi) = report.bmi {
                lines.push(Line::from(Span::styled(
                    format!("BMI: {bmi:.1} kg/m²"),
                    MedicalTheme::text_secondary(),
                )));
            }

            let panel = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            f.render_widget(panel, area);
        }
        _ => {
            // Score unavailable: still a valid report, not an error.
            let block = Block::default()
                .title(Span::styled(" Your FIB-4 Score ", MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border());

            let mut lines = vec![
                Line::from(Span::styled(
                    "The FIB-4 score could not be computed.",
                    MedicalTheme::info(),
                )),
                Line::from(Span::styled(
                    "Platelet, AST and ALT values from a blood test are required for an exact score.",
                    MedicalTheme::text_secondary(),
                )),
            ];
            if let Some(bmi) = report.bmi {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("BMI: {bmi:.1} kg/m²"),
                    MedicalTheme::text_secondary(),
                )));
            }

            let panel = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            f.render_widget(panel, area);
        }
    }
}

fn render_detail_panels(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Matched risk factors
    let factors_block = Block::default()
        .title(Span::styled(" Risk Factors ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let factors = if assessment.report.matched_criteria.is_empty() {
        vec![Line::from(Span::styled(
            "No significant risk factors found.",
            MedicalTheme::success(),
        ))]
    } else {
        assessment
            .report
            .matched_criteria
            .iter()
            .map(|c| {
                Line::from(vec![
                    Span::styled("• ", MedicalTheme::warning()),
                    Span::styled(c.to_string(), MedicalTheme::text()),
                ])
            })
            .collect()
    };
    f.render_widget(Paragraph::new(factors).block(factors_block), chunks[0]);

    // Recommended screening
    let screening_block = Block::default()
        .title(Span::styled(" Next Screening ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let screening = vec![
        Line::from(Span::styled(
            "Recommended tests for fatty-liver screening:",
            MedicalTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Ultrasound   CBC   ALT   AST",
            MedicalTheme::text(),
        )),
    ];
    f.render_widget(
        Paragraph::new(screening)
            .wrap(Wrap { trim: true })
            .block(screening_block),
        chunks[1],
    );
}

fn render_footer(f: &mut Frame, area: Rect, state: &ResultState) {
    let content = if let Some(notice) = &state.notice {
        Line::from(vec![
            Span::styled("✓ ", MedicalTheme::success()),
            Span::styled(notice.clone(), MedicalTheme::text_secondary()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[D] ", MedicalTheme::key_hint()),
            Span::styled("Export Report ", MedicalTheme::key_desc()),
            Span::styled("[J] ", MedicalTheme::key_hint()),
            Span::styled("Export JSON ", MedicalTheme::key_desc()),
            Span::styled("[N] ", MedicalTheme::key_hint()),
            Span::styled("New Assessment ", MedicalTheme::key_desc()),
            Span::styled("[Q] ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
