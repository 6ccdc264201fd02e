use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::model::SelectionMode;
use crate::state::AppState;
use crate::ui::wrap_text;

pub fn draw_question(f: &mut Frame, area: Rect, state: &AppState) {
    let session = state.play.session();
    let (Some(question), Some(mode)) = (session.current_question(), session.current_mode()) else {
        let p = Paragraph::new("No questions").block(Block::default().borders(Borders::ALL));
        f.render_widget(p, area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    let number = session.current_question_index() + 1;
    let total = session.quiz().questions.len();
    let wrap_width = (area.width as usize).saturating_sub(4);

    lines.push(Line::from(Span::styled(
        format!("  Question {} of {}", number, total),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    for (i, text_line) in question.question.lines().enumerate() {
        let style = if i == 0 {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let prefix = if i == 0 {
            format!("  {}. ", number)
        } else {
            "  ".to_string()
        };
        for (wi, wline) in wrap_text(text_line, wrap_width.saturating_sub(prefix.len()))
            .into_iter()
            .enumerate()
        {
            let lead = if wi == 0 {
                prefix.clone()
            } else {
                " ".repeat(prefix.len())
            };
            lines.push(Line::from(Span::styled(format!("{}{}", lead, wline), style)));
        }
    }

    lines.push(Line::from(""));
    if mode == SelectionMode::Multi {
        lines.push(Line::from(Span::styled(
            "  Select all that apply",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (i, answer) in question.answers.iter().enumerate() {
        let is_selected = session.is_selected(i);
        let letter = (b'A' + (i % 26) as u8) as char;
        let mark = match (mode, is_selected) {
            (SelectionMode::Single, true) => "(●)",
            (SelectionMode::Single, false) => "( )",
            (SelectionMode::Multi, true) => "[x]",
            (SelectionMode::Multi, false) => "[ ]",
        };

        let mut style = if is_selected {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        if i == state.choice_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }

        let prefix = format!("  {} {}. ", mark, letter);
        let prefix_len = prefix.chars().count();
        let text_width = (area.width as usize).saturating_sub(prefix_len + 2);
        for (li, wline) in wrap_text(&answer.answer, text_width).iter().enumerate() {
            if li == 0 {
                lines.push(Line::from(vec![
                    Span::styled(prefix.clone(), style),
                    Span::styled(wline.clone(), style),
                ]));
            } else {
                lines.push(Line::from(vec![
                    Span::raw(" ".repeat(prefix_len)),
                    Span::styled(wline.clone(), style),
                ]));
            }
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            "  [Enter] Submit Answer",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled(
            "[Tab] Next",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]));

    if let Some(msg) = &state.message {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", msg),
            Style::default().fg(Color::Red),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Score: {} ", session.score()));
    f.render_widget(Paragraph::new(lines).block(block), area);
}
