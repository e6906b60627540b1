//! CLI command implementations

pub mod analyze;
pub mod export;
pub mod handoff;
pub mod init;
pub mod map;
pub mod results;
pub mod select;
pub mod session;
pub mod validate;
