// VoxFlow — Voice commands to image-generation workflows in Rust
// License: Apache-2.0

pub mod catalog;
pub mod config;
pub mod export;
pub mod interpreter;
pub mod logger;
pub mod session;
pub mod workflow;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
