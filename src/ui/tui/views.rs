use super::settings_view::draw_settings;
use super::styles::palette;
use crate::app::App;
use ratatui::{
    Frame,
    widgets::{Block, Borders},
};

pub(super) fn draw_ui(f: &mut Frame, app: &App) {
    let palette = palette(app.settings.dark_mode);
    let size = f.area();

    let outer = Block::default()
        .borders(Borders::ALL)
        .title("menu-settings")
        .style(palette.base());
    let inner = outer.inner(size);
    f.render_widget(outer, size);

    draw_settings(f, inner, app, &palette);
}
