pub mod cli;
pub mod error;
pub mod model;
pub mod parser;
pub mod play;
pub mod report;
pub mod scoring;
pub mod session;
pub mod state;
pub mod store;
pub mod timer;
pub mod tui;
pub mod ui;
