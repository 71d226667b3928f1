// Dashboard screen implementation

use crate::ui::state::{DashboardState, FileState};
use crate::ui::widgets::{EnhancedProgress, ProgressState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

mod sections;

pub struct Dashboard;

impl Dashboard {
    pub fn render(frame: &mut Frame, state: &DashboardState) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Encoder / format / output
                Constraint::Length(4), // Overall progress
                Constraint::Min(0),    // Files
                Constraint::Length(1), // Footer
            ])
            .split(area);

        Self::render_header(frame, chunks[0], state);
        Self::render_overall(frame, chunks[1], state);
        Self::render_files(frame, chunks[2], state);
        Self::render_footer(frame, chunks[3], state);
    }
}
