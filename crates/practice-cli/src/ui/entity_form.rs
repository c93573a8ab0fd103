//! Create/edit form: one input line per field, the focused one highlighted.

use practice_core::form::FieldKind;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::feature::AnyFeature;

fn hint(kind: FieldKind) -> &'static str {
  match kind {
    FieldKind::Text => "",
    FieldKind::Integer => "number",
    FieldKind::DateTime => "YYYY-MM-DDTHH:MM",
    FieldKind::Language => "FRENCH | ENGLISH | SPANISH",
    FieldKind::Ref => "id",
    FieldKind::RefList => "ids, comma separated",
  }
}

pub fn draw(f: &mut Frame, area: Rect, feature: &AnyFeature) {
  let Some(form) = feature.form_view() else {
    return;
  };

  let block = Block::default()
    .title(format!(" {} ", form.title))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let lines: Vec<Line> = form
    .fields
    .iter()
    .enumerate()
    .map(|(i, field)| {
      let focused = i == form.focus;
      let marker = if field.required { "*" } else { " " };
      let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Cyan)
      };
      let cursor = if focused { "_" } else { "" };
      Line::from(vec![
        Span::styled(format!("{marker}{:<18}", field.label), label_style),
        Span::raw(format!("{}{cursor}", field.value)),
        Span::styled(
          format!("  {}", hint(field.kind)),
          Style::default().fg(Color::DarkGray),
        ),
      ])
    })
    .collect();

  f.render_widget(Paragraph::new(lines), inner);
}
