//! TUI rendering: orchestrates all panes.

pub mod delete_dialog;
pub mod entity_detail;
pub mod entity_form;
pub mod entity_list;
pub mod menu;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    format!(" practice  {}", app.url),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::DarkGray),
  );

  let left_width = left.content.chars().count() as u16;
  let right_width = right.content.len() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  let Some(feature) = &app.feature else {
    menu::draw(f, area, app);
    return;
  };

  match app.screen() {
    Screen::Menu => menu::draw(f, area, app),
    Screen::List => entity_list::draw(f, area, feature),
    Screen::Detail => entity_detail::draw(f, area, feature),
    Screen::Form => entity_form::draw(f, area, feature),
    Screen::DeleteDialog => {
      if feature.is_detail() {
        entity_detail::draw(f, area, feature);
      } else {
        entity_list::draw(f, area, feature);
      }
      delete_dialog::draw(f, area, feature);
    }
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let filtering = app.feature.as_ref().is_some_and(|f| f.filter().1);
  let (mode_label, hints) = match app.screen() {
    Screen::Menu => ("MENU", "↑↓/jk navigate  Enter open  q quit"),
    Screen::List if filtering => ("SEARCH", "Type to filter  Esc clear  Enter keep"),
    Screen::List => (
      "LIST",
      "Enter view  c create  e edit  d delete  / search  n/p page  Esc menu  q quit",
    ),
    Screen::Detail => ("DETAIL", "Esc back  e edit  d delete  q quit"),
    Screen::Form => ("FORM", "Tab next field  Enter save  Esc cancel"),
    Screen::DeleteDialog => ("DELETE", "y confirm  n cancel"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span]))
      .style(Style::default().bg(Color::Black)),
    area,
  );
}
