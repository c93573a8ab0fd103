//! Delete confirmation overlay.

use ratatui::{
  Frame,
  layout::{Constraint, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::feature::AnyFeature;

/// Draw the dialog centred over `area`, if one is open.
pub fn draw(f: &mut Frame, area: Rect, feature: &AnyFeature) {
  let Some(target) = feature.dialog_target() else {
    return;
  };

  let [row] = Layout::vertical([Constraint::Length(6)])
    .flex(Flex::Center)
    .areas(area);
  let [popup] = Layout::horizontal([Constraint::Length(60)])
    .flex(Flex::Center)
    .areas(row);

  let block = Block::default()
    .title(" Confirm delete operation ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));

  let text = vec![
    Line::from(format!(
      "Are you sure you want to delete {} {target}?",
      feature.heading()
    )),
    Line::from(""),
    Line::from(vec![
      Span::styled("[y] Delete", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
      Span::raw("   "),
      Span::styled("[n] Cancel", Style::default().fg(Color::DarkGray)),
    ]),
  ];

  f.render_widget(Clear, popup);
  f.render_widget(Paragraph::new(text).block(block), popup);
}
