//! Rendering
//!
//! Pure draw functions over the [`App`] state; nothing here mutates it.

mod auth;
mod modal;
mod tasks;

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use tp_core::task::{TaskPriority, TaskStatus};

use crate::app::{App, Session};

pub fn draw(frame: &mut Frame, app: &App) {
    match &app.session {
        Session::Checking => draw_checking(frame),
        Session::Anonymous => auth::draw(frame, &app.auth),
        Session::Authenticated(user) => {
            tasks::draw(frame, user, &app.view, app.now());
            if let Some(modal) = &app.view.modal {
                modal::draw(frame, modal, app.view.saving);
            }
        }
    }
}

fn draw_checking(frame: &mut Frame) {
    let area = centered_rect(30, 1, frame.area());
    let text = Paragraph::new("Checking session...")
        .style(Style::default().fg(Color::DarkGray))
        .centered();
    frame.render_widget(text, area);
}

/// Fixed-size rect centered in `area`, clamped to its bounds.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

pub(crate) fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "pending",
        TaskStatus::InProgress => "in progress",
        TaskStatus::Completed => "completed",
        TaskStatus::Cancelled => "cancelled",
    }
}

pub(crate) fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Pending => Color::DarkGray,
        TaskStatus::InProgress => Color::Blue,
        TaskStatus::Completed => Color::Green,
        TaskStatus::Cancelled => Color::Gray,
    }
}

pub(crate) fn priority_label(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::Low => "low",
        TaskPriority::Medium => "medium",
        TaskPriority::High => "high",
        TaskPriority::Urgent => "urgent",
    }
}

pub(crate) fn priority_color(priority: TaskPriority) -> Color {
    match priority {
        TaskPriority::Low => Color::Gray,
        TaskPriority::Medium => Color::Yellow,
        TaskPriority::High => Color::LightRed,
        TaskPriority::Urgent => Color::Red,
    }
}
