use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::report::{build_report, QuestionResult, Report};
use crate::scoring::Verdict;
use crate::state::AppState;

pub fn draw_completed(f: &mut Frame, area: Rect, state: &AppState) {
    let session = state.play.session();

    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "✓  Quiz Completed!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("You got {} points.", session.score())),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] View Results    [q] Exit",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

fn verdict_color(verdict: Verdict) -> Color {
    match verdict {
        Verdict::FullyCorrect => Color::Green,
        Verdict::PartiallyCorrect => Color::Blue,
        Verdict::Incorrect => Color::Red,
    }
}

pub fn result_lines(result: &QuestionResult) -> Vec<Line<'static>> {
    let color = verdict_color(result.verdict());
    let label = Style::default().fg(color).add_modifier(Modifier::BOLD);
    let value = Style::default().fg(color);

    vec![
        Line::from(vec![
            Span::styled("Question: ", label),
            Span::styled(result.question.clone(), value),
        ]),
        Line::from(vec![
            Span::styled("Correct Answers: ", label),
            Span::styled(result.correct_answers.join(", "), value),
        ]),
        Line::from(vec![
            Span::styled("Your Answers: ", label),
            Span::styled(result.user_answers.clone(), value),
        ]),
        Line::from(""),
    ]
}

pub fn results_title(report: &Report) -> String {
    format!(" Results: {} ", report.quiz_name)
}

pub fn draw_results(f: &mut Frame, area: Rect, state: &AppState) {
    let report = match build_report(state.play.session()) {
        Ok(r) => r,
        Err(e) => {
            let p = Paragraph::new(e.to_string()).block(Block::default().borders(Borders::ALL));
            f.render_widget(p, area);
            return;
        }
    };

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            format!("Score: {} / {}", report.score, report.max_score),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for result in &report.results {
        lines.extend(result_lines(result));
    }

    let scroll = state.results_scroll.min(u16::MAX as usize) as u16;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(results_title(&report));
    let widget = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, Question, Quiz};
    use crate::session::Session;

    #[test]
    fn test_results_title_names_the_quiz() {
        let quiz = Quiz::new(
            "Rust Basics",
            vec![Question::new(
                "Borrow checker?",
                vec![Answer::new("yes", true), Answer::new("no", false)],
            )],
        );
        let mut session = Session::new(quiz);
        session.skip().unwrap();
        let report = build_report(&session).unwrap();
        assert_eq!(results_title(&report), " Results: Rust Basics ");
    }
}
