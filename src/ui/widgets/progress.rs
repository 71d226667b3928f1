// Block-character progress bar whose look follows the batch state

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressState {
    Running,
    Done,
    Pending,
}

pub struct EnhancedProgress {
    percent: u16,
    state: ProgressState,
}

impl EnhancedProgress {
    pub fn new(percent: u16, state: ProgressState) -> Self {
        Self {
            percent: percent.min(100),
            state,
        }
    }
}

impl Widget for EnhancedProgress {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let filled_width = (area.width as u32 * self.percent as u32 / 100) as u16;

        let (filled_symbol, unfilled_symbol, filled_fg, unfilled_fg) = match self.state {
            ProgressState::Running => ("█", "░", Color::Cyan, Color::DarkGray),
            ProgressState::Done => ("█", " ", Color::Green, Color::Black),
            ProgressState::Pending => ("░", "░", Color::DarkGray, Color::Black),
        };

        for x in 0..area.width {
            let (symbol, fg) = if x < filled_width {
                (filled_symbol, filled_fg)
            } else {
                (unfilled_symbol, unfilled_fg)
            };
            buf.set_string(area.x + x, area.y, symbol, Style::default().fg(fg));
        }
    }
}
