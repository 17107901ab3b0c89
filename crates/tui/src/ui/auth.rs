//! Login / register form

use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AuthField, AuthForm, AuthMode};

use super::centered_rect;

fn field_label(field: AuthField) -> &'static str {
    match field {
        AuthField::Name => "NAME",
        AuthField::Email => "EMAIL",
        AuthField::Password => "PASSWORD",
    }
}

pub fn draw(frame: &mut Frame, form: &AuthForm) {
    let dim = Style::default().fg(Color::DarkGray);
    let subtitle = match form.mode {
        AuthMode::Login => "Sign in to your account",
        AuthMode::Register => "Create your account",
    };

    let mut lines = vec![Line::styled(subtitle, dim), Line::default()];

    for field in form.fields() {
        let focused = *field == form.focus;
        let mut value = if *field == AuthField::Password {
            "\u{2022}".repeat(form.value(*field).chars().count())
        } else {
            form.value(*field).to_string()
        };
        if focused {
            value.push('_');
        }
        let value_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::styled(field_label(*field), dim));
        lines.push(Line::styled(value, value_style));
        lines.push(Line::default());
    }

    if let Some(error) = &form.error {
        lines.push(Line::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ));
        lines.push(Line::default());
    }

    let action = if form.loading {
        Span::styled("Please wait...", dim)
    } else {
        let label = match form.mode {
            AuthMode::Login => "[ Enter: sign in ]",
            AuthMode::Register => "[ Enter: create account ]",
        };
        Span::styled(label, Style::default().add_modifier(Modifier::BOLD))
    };
    lines.push(Line::from(action));
    lines.push(Line::default());
    let toggle_hint = match form.mode {
        AuthMode::Login => "Tab next · Ctrl+R register · Esc quit",
        AuthMode::Register => "Tab next · Ctrl+R sign in · Esc quit",
    };
    lines.push(Line::styled(toggle_hint, dim));

    let height = lines.len() as u16 + 2;
    let area = centered_rect(46, height, frame.area());
    let card = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL).title(" Taskpad "));
    frame.render_widget(card, area);
}
