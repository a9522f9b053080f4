use crate::settings::MAX_VOLUME;
use ratatui::widgets::ListState;

pub(super) fn list_state(selected: usize) -> ListState {
    let mut st = ListState::default();
    st.select(Some(selected));
    st
}

pub(super) fn volume_bar_text(volume: u8, width: usize) -> String {
    let volume = usize::from(volume.min(MAX_VOLUME));
    let filled = (volume * width / usize::from(MAX_VOLUME)).min(width);
    let bar = "#".repeat(filled) + &"-".repeat(width - filled);
    format!("[{bar}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_bar_bounds() {
        assert_eq!(volume_bar_text(0, 10), "[----------]");
        assert_eq!(volume_bar_text(50, 10), "[#####-----]");
        assert_eq!(volume_bar_text(100, 10), "[##########]");
        assert_eq!(volume_bar_text(255, 4), "[####]");
    }
}
