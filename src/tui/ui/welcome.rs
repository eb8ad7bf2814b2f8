//! Welcome screen shown before the questionnaire starts.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::styles::{MedicalTheme, LOGO};

/// Render the welcome screen.
pub fn render_welcome(f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),  // Logo
            Constraint::Length(4),  // Intro
            Constraint::Length(8),  // Feature cards
            Constraint::Min(0),     // Spacer
            Constraint::Length(3),  // Key hints
        ])
        .margin(1)
        .split(area);

    let logo = Paragraph::new(
        LOGO.lines()
            .map(|l| Line::from(Span::styled(l.to_string(), MedicalTheme::subtitle())))
            .collect::<Vec<_>>(),
    )
    .alignment(Alignment::Center);
    f.render_widget(logo, chunks[0]);

    let intro = Paragraph::new(vec![
        Line::from(Span::styled(
            "Fatty Liver Risk Checkup",
            MedicalTheme::title(),
        )),
        Line::from(Span::styled(
            "Answer a few questions about your lifestyle and health to learn your liver risk in minutes.",
            MedicalTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(intro, chunks[1]);

    render_feature_cards(f, chunks[2]);

    let hints = Paragraph::new(Line::from(vec![
        Span::styled("[Enter] ", MedicalTheme::key_hint()),
        Span::styled("Start Assessment ", MedicalTheme::key_desc()),
        Span::styled("[Q] ", MedicalTheme::key_hint()),
        Span::styled("Quit", MedicalTheme::key_desc()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(hints, chunks[4]);
}

fn render_feature_cards(f: &mut Frame, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    let features = [
        ("Simple Questions", "Provide your physical details"),
        ("Accurate Result", "FIB-4 score and risk analysis"),
        ("Expert Guidance", "Advice on your next steps"),
    ];

    for (i, (title, body)) in features.iter().enumerate() {
        let card = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(*title, MedicalTheme::subtitle())),
            Line::from(Span::styled(*body, MedicalTheme::text_secondary())),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        );
        f.render_widget(card, cards[i]);
    }
}
