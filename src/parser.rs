use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde::Deserialize;

use crate::model::*;

#[derive(Debug, Default, Deserialize)]
struct Frontmatter {
    name: Option<String>,
}

/// Parse a Markdown quiz document.
///
/// ```text
/// # Quiz name
///
/// ## Which call creates a new process?
/// - [ ] exec
/// - [x] fork
/// ```
///
/// Each `##` heading starts a question, task-list items are its options and a
/// checked box marks a correct option. An optional YAML frontmatter block may
/// override the name.
pub fn parse_quiz(content: &str) -> Result<Quiz, String> {
    let (frontmatter, body) = split_frontmatter(content)?;
    let fm: Frontmatter = match frontmatter {
        Some(text) => {
            serde_yaml::from_str(&text).map_err(|e| format!("Invalid frontmatter: {}", e))?
        }
        None => Frontmatter::default(),
    };

    let (title, questions) = parse_body(body)?;
    let name = fm.name.unwrap_or(title);

    Ok(Quiz::new(name, questions))
}

fn split_frontmatter(content: &str) -> Result<(Option<String>, &str), String> {
    let trimmed = content.trim_start();
    let Some(after_first) = trimmed.strip_prefix("---") else {
        return Ok((None, content));
    };

    let end_pos = after_first
        .find("\n---")
        .ok_or_else(|| "No closing --- for frontmatter".to_string())?;

    let fm = after_first[..end_pos].trim().to_string();
    let body = &after_first[end_pos + 4..];

    Ok((Some(fm), body))
}

#[derive(Default)]
struct PendingQuestion {
    heading: String,
    body: Vec<String>,
    answers: Vec<Answer>,
}

impl PendingQuestion {
    fn finish(self) -> Question {
        let mut text = strip_number(&self.heading).to_string();
        for para in self.body {
            text.push('\n');
            text.push_str(&para);
        }
        Question::new(text, self.answers)
    }
}

fn parse_body(body: &str) -> Result<(String, Vec<Question>), String> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TASKLISTS);
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let mut title = String::new();
    let mut questions: Vec<Question> = Vec::new();
    let mut current: Option<PendingQuestion> = None;

    let mut in_h1 = false;
    let mut in_h2 = false;
    let mut in_item = false;
    let mut item_text = String::new();
    let mut task_checked: Option<bool> = None;
    let mut in_paragraph = false;
    let mut paragraph_text = String::new();

    for event in Parser::new_ext(body, opts) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => match level {
                HeadingLevel::H1 => in_h1 = true,
                HeadingLevel::H2 => {
                    if let Some(q) = current.take() {
                        questions.push(q.finish());
                    }
                    current = Some(PendingQuestion::default());
                    in_h2 = true;
                }
                _ => {}
            },
            Event::End(TagEnd::Heading(level)) => match level {
                HeadingLevel::H1 => in_h1 = false,
                HeadingLevel::H2 => in_h2 = false,
                _ => {}
            },
            Event::Start(Tag::Item) => {
                in_item = true;
                item_text.clear();
                task_checked = None;
            }
            Event::End(TagEnd::Item) => {
                in_item = false;
                if let Some(q) = current.as_mut() {
                    match task_checked {
                        Some(checked) => {
                            q.answers.push(Answer::new(item_text.trim(), checked));
                        }
                        None if !item_text.trim().is_empty() => {
                            return Err(format!(
                                "Question {}: options must be task list items (- [ ] or - [x]), got: {}",
                                questions.len() + 1,
                                item_text.trim()
                            ));
                        }
                        None => {}
                    }
                }
                task_checked = None;
            }
            Event::TaskListMarker(checked) => {
                task_checked = Some(checked);
            }
            Event::Start(Tag::Paragraph) => {
                in_paragraph = true;
                paragraph_text.clear();
            }
            Event::End(TagEnd::Paragraph) => {
                in_paragraph = false;
                let text = paragraph_text.trim();
                if !in_item && !text.is_empty() {
                    if let Some(q) = current.as_mut() {
                        q.body.push(text.to_string());
                    }
                }
            }
            Event::Text(text) => {
                if in_h1 {
                    title.push_str(&text);
                } else if in_h2 {
                    if let Some(q) = current.as_mut() {
                        q.heading.push_str(&text);
                    }
                } else if in_item {
                    item_text.push_str(&text);
                } else if in_paragraph {
                    paragraph_text.push_str(&text);
                }
            }
            Event::Code(code) => {
                let c = format!("`{}`", code);
                if in_h2 {
                    if let Some(q) = current.as_mut() {
                        q.heading.push_str(&c);
                    }
                } else if in_item {
                    item_text.push_str(&c);
                } else if in_paragraph {
                    paragraph_text.push_str(&c);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if in_item {
                    item_text.push(' ');
                } else if in_paragraph {
                    paragraph_text.push(' ');
                }
            }
            _ => {}
        }
    }

    if let Some(q) = current.take() {
        questions.push(q.finish());
    }

    Ok((title.trim().to_string(), questions))
}

/// "3. What is..." -> "What is..."
fn strip_number(heading: &str) -> &str {
    let trimmed = heading.trim();
    if let Some((num, rest)) = trimmed.split_once('.') {
        if !num.is_empty() && num.trim().chars().all(|c| c.is_ascii_digit()) {
            return rest.trim();
        }
    }
    trimmed
}
