//! List screen: the record table, or a notice when there is nothing to show.

use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, Paragraph, Row, Table, TableState},
};

use crate::feature::AnyFeature;

/// Render the list screen for `feature` into `area`.
pub fn draw(f: &mut Frame, area: Rect, feature: &AnyFeature) {
  let table = feature.table();
  let (filter, filter_active) = feature.filter();

  let mut title = if filter.is_empty() {
    format!(" {} ({}) ", feature.heading(), table.total)
  } else {
    format!(" {} ({}/{}) ", feature.heading(), table.rows.len(), table.total)
  };
  if let Some(total) = feature.total_count() {
    title.push_str(&format!("page {} · {total} total ", feature.page_number() + 1));
  }

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let mut inner = block.inner(area);
  f.render_widget(block, area);

  if (filter_active || !filter.is_empty()) && inner.height > 2 {
    let filter_area = Rect {
      x:      inner.x,
      y:      inner.y + inner.height.saturating_sub(1),
      width:  inner.width,
      height: 1,
    };
    inner.height = inner.height.saturating_sub(1);
    let text = if filter_active { format!("/{filter}_") } else { format!("/{filter}") };
    f.render_widget(
      Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  if !feature.has_table() {
    f.render_widget(
      Paragraph::new(format!("No {} records found", feature.heading()))
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let header = Row::new(table.columns.clone()).style(
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let widths = vec![Constraint::Fill(1); table.columns.len()];
  let rows = table.rows.into_iter().map(Row::new);

  let mut state = TableState::default();
  state.select(Some(feature.cursor()));

  f.render_stateful_widget(
    Table::new(rows, widths).header(header).row_highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner,
    &mut state,
  );
}
