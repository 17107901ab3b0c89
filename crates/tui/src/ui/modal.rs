//! Modal shell: the create/edit form and the delete confirmation
//!
//! Rendered above the task list with a [`Clear`] backdrop. Key handling for
//! open modals lives in the app update logic, which routes every key here
//! first so underlying list bindings cannot fire.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::{FormField, Modal, TaskForm};

use super::{centered_rect, priority_label};

pub fn draw(frame: &mut Frame, modal: &Modal, saving: bool) {
    match modal {
        Modal::TaskForm(form) => draw_task_form(frame, form, saving),
        Modal::ConfirmDelete { .. } => draw_confirm(frame),
    }
}

fn draw_confirm(frame: &mut Frame) {
    let area = centered_rect(34, 5, frame.area());
    frame.render_widget(Clear, area);
    let body = Paragraph::new(vec![
        Line::from("Delete this task?"),
        Line::default(),
        Line::styled("y delete · n cancel", Style::default().fg(Color::DarkGray)),
    ])
    .centered()
    .block(Block::default().borders(Borders::ALL).title(" Delete task "));
    frame.render_widget(body, area);
}

fn draw_task_form(frame: &mut Frame, form: &TaskForm, saving: bool) {
    let dim = Style::default().fg(Color::DarkGray);
    let title = if form.editing.is_some() {
        " Edit task "
    } else {
        " New task "
    };

    let fields: [(&str, FormField, String); 4] = [
        ("TITLE *", FormField::Title, form.title.clone()),
        ("DESCRIPTION", FormField::Description, form.description.clone()),
        (
            "PRIORITY  (←/→)",
            FormField::Priority,
            priority_label(form.priority).to_string(),
        ),
        ("DUE DATE  (YYYY-MM-DD)", FormField::DueDate, form.due_date.clone()),
    ];

    let mut lines = Vec::new();
    for (label, field, value) in fields {
        let focused = field == form.focus;
        let mut value = value;
        if focused && field != FormField::Priority {
            value.push('_');
        }
        let style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::styled(label, dim));
        lines.push(Line::styled(value, style));
        lines.push(Line::default());
    }

    if saving {
        lines.push(Line::styled("Saving...", dim));
    } else {
        lines.push(Line::styled(
            "Enter save · Tab next · Esc cancel",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    let height = lines.len() as u16 + 2;
    let area = centered_rect(48, height, frame.area());
    frame.render_widget(Clear, area);
    let card = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(card, area);
}
