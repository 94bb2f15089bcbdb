pub mod collector;
pub mod delta;
pub mod history;
pub mod mock;
pub mod platform;
pub mod procfs;
pub mod provider;
pub mod snapshot;
pub mod utmp;
