pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod interrupt;
pub mod system;
pub mod ui;
