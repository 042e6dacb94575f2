pub mod config;
pub mod error;
pub mod events;
pub mod picker;
pub mod ui;
