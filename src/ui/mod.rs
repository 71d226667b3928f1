// Terminal UI using Ratatui

pub mod dashboard;
pub mod events;
pub mod state;
pub mod widgets;

pub use dashboard::Dashboard;
pub use events::run_batch_dashboard;
pub use state::DashboardState;
