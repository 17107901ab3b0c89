//! Task list screen: header, stats bar, search/filter row, list and footer

use chrono::{DateTime, Utc};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use tp_core::auth::User;
use tp_core::task::{self, Task};

use crate::app::{InputFocus, TasksView};

use super::{priority_color, priority_label, status_color, status_label};

pub fn draw(frame: &mut Frame, user: &User, view: &TasksView, now: DateTime<Utc>) {
    let mut constraints = vec![
        Constraint::Length(2), // header
        Constraint::Length(3), // stats
        Constraint::Length(3), // search + filter
    ];
    if view.error.is_some() {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(1)); // list
    constraints.push(Constraint::Length(1)); // footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    let counts = task::counts(&view.tasks);

    draw_header(frame, chunks[0], user, counts.completed, counts.total);
    draw_stats(frame, chunks[1], counts.total, counts.pending, counts.completed);
    draw_filters(frame, chunks[2], view);

    let mut next = 3;
    if let Some(error) = &view.error {
        let banner = Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red));
        frame.render_widget(banner, chunks[next]);
        next += 1;
    }

    draw_list(frame, chunks[next], view, now);
    draw_footer(frame, chunks[next + 1]);
}

fn draw_header(frame: &mut Frame, area: Rect, user: &User, done: usize, total: usize) {
    let lines = vec![
        Line::from(Span::styled(
            "Taskpad",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::styled(
            format!("{} of {} done · {}", done, total, user.name),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_stats(frame: &mut Frame, area: Rect, total: usize, pending: usize, completed: usize) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    let cells = [
        ("Total", total, Style::default()),
        ("Pending", pending, Style::default().fg(Color::Yellow)),
        ("Completed", completed, Style::default().fg(Color::Green)),
    ];
    for ((label, value, style), chunk) in cells.into_iter().zip(chunks.iter()) {
        let cell = Paragraph::new(Span::styled(value.to_string(), style))
            .centered()
            .block(Block::default().borders(Borders::ALL).title(label));
        frame.render_widget(cell, *chunk);
    }
}

fn draw_filters(frame: &mut Frame, area: Rect, view: &TasksView) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(18)])
        .split(area);

    let searching = view.focus == InputFocus::Search;
    let mut text = view.search.clone();
    if searching {
        text.push('_');
    }
    let search_block = Block::default()
        .borders(Borders::ALL)
        .title(" Search (/) ")
        .border_style(if searching {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        });
    frame.render_widget(Paragraph::new(text).block(search_block), chunks[0]);

    let filter_text = view
        .status_filter
        .map(status_label)
        .unwrap_or("all");
    let filter = Paragraph::new(filter_text)
        .block(Block::default().borders(Borders::ALL).title(" Filter (f) "));
    frame.render_widget(filter, chunks[1]);
}

fn draw_list(frame: &mut Frame, area: Rect, view: &TasksView, now: DateTime<Utc>) {
    let visible = view.visible();

    if visible.is_empty() {
        let message = if view.loading {
            "Loading..."
        } else {
            "No tasks found — press n to create one"
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|task| ListItem::new(task_line(task, now)))
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(view.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn task_line(task: &Task, now: DateTime<Utc>) -> Line<'static> {
    let completed = task.status == tp_core::task::TaskStatus::Completed;

    let checkbox = if completed {
        Span::styled("[x] ", Style::default().fg(Color::Green))
    } else {
        Span::raw("[ ] ")
    };

    let title_style = if completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };

    let mut spans = vec![
        checkbox,
        Span::styled(
            format!("{} ", priority_label(task.priority)),
            Style::default().fg(priority_color(task.priority)),
        ),
        Span::styled(task.title.clone(), title_style),
        Span::styled(
            format!(" · {}", status_label(task.status)),
            Style::default().fg(status_color(task.status)),
        ),
    ];

    if let Some(due) = task.due_date {
        let overdue = task.is_overdue(now);
        let style = if overdue {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let marker = if overdue { "!" } else { "" };
        spans.push(Span::styled(format!(" · due {due}{marker}"), style));
    }

    if let Some(description) = &task.description {
        spans.push(Span::styled(
            format!("  {description}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    Line::from(spans)
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let hints =
        "n new · e edit · d delete · c complete · / search · f filter · r refresh · L logout · q quit";
    let footer = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}
