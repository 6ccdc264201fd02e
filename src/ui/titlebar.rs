use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::{AppState, Screen};

const LOW_TIME_SECS: u32 = 5;

pub fn draw_titlebar(f: &mut Frame, area: Rect, state: &AppState) {
    let session = state.play.session();
    let title = &session.quiz().name;

    let timer_text = if state.screen == Screen::Playing && !session.completed() {
        let secs = session.remaining_seconds();
        let formatted = format!(" Time Left: {}s ", secs);
        if secs <= LOW_TIME_SECS {
            Span::styled(
                formatted,
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(formatted, Style::default().fg(Color::Rgb(200, 200, 120)))
        }
    } else {
        Span::raw("")
    };

    let title_text = format!("[ {} ]", title);
    let title_span = Span::styled(
        title_text.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    // Centre the title and push the timer to the right edge.
    let available = area.width as usize;
    let timer_len = timer_text.content.chars().count();
    let title_len = title_text.chars().count();
    let center_pad = available.saturating_sub(title_len) / 2;
    let right_pad = available.saturating_sub(center_pad + title_len + timer_len);

    let line = Line::from(vec![
        Span::raw(" ".repeat(center_pad)),
        title_span,
        Span::raw(" ".repeat(right_pad)),
        timer_text,
    ]);

    let widget = Paragraph::new(line)
        .style(Style::default().bg(Color::DarkGray))
        .alignment(Alignment::Left);
    f.render_widget(widget, area);
}
