//! Detail screen: field/value pairs for one record.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::feature::AnyFeature;

pub fn draw(f: &mut Frame, area: Rect, feature: &AnyFeature) {
  let block = Block::default()
    .title(format!(" {} ", feature.heading()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let Some(fields) = feature.detail() else {
    return;
  };

  let lines: Vec<Line> = fields
    .into_iter()
    .map(|(label, value)| {
      let value = if value.is_empty() { "-".to_string() } else { value };
      Line::from(vec![
        Span::styled(
          format!("{label:<18}"),
          Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
      ])
    })
    .collect();

  f.render_widget(Paragraph::new(lines), inner);
}
