use crate::core::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;

pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = format!("Verdict v{} • {}", env!("CARGO_PKG_VERSION"), app.base_url);
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let form = app.submission.form();
    let lines = vec![
        Line::from(vec![
            Span::styled("Greeting: ", label),
            Span::raw(app.greeting.text()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Backend: ", label),
            Span::styled(form.last_response(), Style::default().fg(Color::White)),
        ]),
    ];
    let body = Paragraph::new(lines)
        .block(Block::default().title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(body, chunks[0]);

    if let Some(status) = &app.status {
        let status_line = Paragraph::new(Span::styled(
            status.as_str(),
            Style::default().fg(Color::DarkGray),
        ));
        f.render_widget(status_line, chunks[1]);
    }

    let input_title = if form.is_submitting() {
        format!(
            "Waiting for the verdict {} (Ctrl+C to quit)",
            pulse_symbol(app.pulse_start.elapsed())
        )
    } else {
        "Ask a decision question (Enter to send, Ctrl+C to quit)".to_string()
    };
    let input = Paragraph::new(form.input_text())
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(input_title));
    f.render_widget(input, chunks[2]);

    if app.notice.is_none() {
        let typed = u16::try_from(form.input_text().chars().count()).unwrap_or(u16::MAX);
        let cursor_x = chunks[2].x.saturating_add(1).saturating_add(typed);
        let max_x = chunks[2].x + chunks[2].width.saturating_sub(2);
        f.set_cursor_position((cursor_x.min(max_x), chunks[2].y + 1));
    }

    if let Some(notice) = &app.notice {
        let area = centered_rect(40, 5, f.area());
        let popup = Paragraph::new(vec![
            Line::from(Span::styled(
                notice.as_str(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Press any key to continue",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Error"));
        f.render_widget(Clear, area);
        f.render_widget(popup, area);
    }
}

/// Three-frame pulse, two cycles per second.
pub fn pulse_symbol(elapsed: Duration) -> &'static str {
    let phase = (elapsed.as_millis() as f32 / 1000.0 * 2.0) % 2.0;
    let intensity = if phase < 1.0 { phase } else { 2.0 - phase };
    if intensity < 0.33 {
        "○"
    } else if intensity < 0.66 {
        "◐"
    } else {
        "●"
    }
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
