pub mod client;
pub mod format;
pub mod guard;
pub mod platform;
pub mod status;
