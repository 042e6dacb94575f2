pub mod app;
mod command;
mod context;
mod month_pane;
mod picker_window;

pub use command::{parse_command, run_command, Action};
pub use context::{Context, Mode, Theme};
pub use month_pane::{DayCell, MonthPane};
pub use picker_window::{ControlsBar, StatusLine};
