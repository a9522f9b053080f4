use super::styles::Palette;
use super::widgets::{list_state, volume_bar_text};
use crate::app::{App, SettingsItem};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::Rect,
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

const VOLUME_BAR_WIDTH: usize = 20;

pub(super) fn draw_settings(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(area);

    let items: Vec<ListItem> = SettingsItem::ALL
        .iter()
        .map(|&item| {
            let value = app.value_label(item);
            let line = if matches!(item, SettingsItem::Volume) {
                format!(
                    "{}: {} {value}",
                    item.label(),
                    volume_bar_text(app.settings.volume, VOLUME_BAR_WIDTH)
                )
            } else {
                format!("{}: {value}", item.label())
            };
            ListItem::new(Line::from(line))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("设置（↑↓选择，Enter 切换，←→ 调整，q 退出）"),
        )
        .style(palette.base())
        .highlight_style(palette.highlight())
        .highlight_symbol("> ");

    f.render_stateful_widget(list, chunks[0], &mut list_state(app.settings_selected));

    let paragraph = Paragraph::new(app.status_line())
        .block(Block::default().borders(Borders::ALL).title("状态"))
        .wrap(Wrap { trim: true })
        .style(palette.status(app.save_error.is_some()));
    f.render_widget(paragraph, chunks[1]);
}
