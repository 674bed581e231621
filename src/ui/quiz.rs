use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::engine::{format_time_remaining, QuestionView};

const OPTION_LABELS: &[u8] = b"ABCDEFGHIJ";

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.session().current_question_view();

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_header(frame, chunks[0], app, &view);
    render_question_text(frame, chunks[1], &view.question.text);
    render_options(frame, chunks[2], app, &view);
    render_feedback(frame, chunks[3], &view);
    render_controls(frame, chunks[4], &view);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, view: &QuestionView<'_>) {
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    if let Some(seconds) = app.session().time_remaining() {
        let color = if seconds <= 30 {
            Color::Red
        } else {
            Color::DarkGray
        };
        let timer = Paragraph::new(format!("Time left: {}", format_time_remaining(seconds)))
            .alignment(Alignment::Left)
            .fg(color);
        frame.render_widget(timer, halves[0]);
    }

    let progress = format!("{}/{}", view.index + 1, view.total);
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, halves[1]);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, app: &App, view: &QuestionView<'_>) {
    let mut lines: Vec<Line> = Vec::with_capacity(view.question.options.len() * 2);

    for (index, option) in view.question.options.iter().enumerate() {
        let (marker, style) = option_presentation(app, view, index);
        let label = *OPTION_LABELS.get(index).unwrap_or(&b'?') as char;

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Interactive cursor before answering; frozen correct/incorrect colors
/// after.
fn option_presentation(app: &App, view: &QuestionView<'_>, index: usize) -> (&'static str, Style) {
    match view.answer {
        None => {
            if index == app.selected_option() {
                (">", Style::default().fg(Color::Cyan).bold())
            } else {
                (" ", Style::default().fg(Color::Gray))
            }
        }
        Some(recorded) => {
            if view.question.is_correct(index) {
                ("+", Style::default().fg(Color::Green).bold())
            } else if index == recorded.selected {
                ("-", Style::default().fg(Color::Red))
            } else {
                (" ", Style::default().fg(Color::DarkGray))
            }
        }
    }
}

fn render_feedback(frame: &mut Frame, area: Rect, view: &QuestionView<'_>) {
    let Some(recorded) = view.answer else {
        return;
    };

    let verdict = if recorded.is_correct {
        Span::styled("Correct!", Style::default().fg(Color::Green).bold())
    } else {
        Span::styled("Incorrect.", Style::default().fg(Color::Red).bold())
    };

    let mut lines = vec![Line::from(verdict)];
    if let Some(explanation) = view.question.explanation.as_deref() {
        lines.push(Line::from(explanation.fg(Color::Gray)));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, view: &QuestionView<'_>) {
    let text = if view.answer.is_none() {
        "j/k navigate  ·  enter answer  ·  h previous  ·  q quit"
    } else if view.index + 1 == view.total {
        "l finish  ·  h previous  ·  q quit"
    } else {
        "l next  ·  h previous  ·  q quit"
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
