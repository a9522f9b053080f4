use ratatui::style::{Color, Modifier, Style};

/// 深色 / 浅色两套配色，随 `mode_dark` 切换
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Palette {
    pub(super) fg: Color,
    pub(super) bg: Color,
    pub(super) accent: Color,
    pub(super) muted: Color,
    pub(super) error: Color,
}

pub(super) fn palette(dark_mode: bool) -> Palette {
    if dark_mode {
        Palette {
            fg: Color::Gray,
            bg: Color::Black,
            accent: Color::Yellow,
            muted: Color::DarkGray,
            error: Color::LightRed,
        }
    } else {
        Palette {
            fg: Color::Black,
            bg: Color::White,
            accent: Color::Blue,
            muted: Color::Gray,
            error: Color::Red,
        }
    }
}

impl Palette {
    pub(super) fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub(super) fn highlight(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    pub(super) fn hint(&self) -> Style {
        Style::default().fg(self.muted).bg(self.bg)
    }

    pub(super) fn status(&self, is_error: bool) -> Style {
        if is_error {
            Style::default().fg(self.error).bg(self.bg)
        } else {
            self.hint()
        }
    }
}
