//! Entity menu: one line per registered route.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::app::App;

/// Human label from a page-title key: `practiceApp.jobHistory.home.title`
/// becomes `Job History`.
pub fn title_label(page_title: &str) -> String {
  let key = page_title.split('.').nth(1).unwrap_or(page_title);
  let mut label = String::new();
  for (i, c) in key.chars().enumerate() {
    if i == 0 {
      label.extend(c.to_uppercase());
    } else if c.is_uppercase() {
      label.push(' ');
      label.push(c);
    } else {
      label.push(c);
    }
  }
  label
}

/// Render the entity menu into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Entities ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let items: Vec<ListItem> = app
    .router
    .routes()
    .iter()
    .map(|route| {
      ListItem::new(Line::from(vec![
        Span::raw(format!("{:<20}", title_label(route.page_title))),
        Span::styled(
          format!("/{}", route.path),
          Style::default().fg(Color::DarkGray),
        ),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.menu_cursor));

  f.render_stateful_widget(
    List::new(items).block(block).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    area,
    &mut state,
  );
}
