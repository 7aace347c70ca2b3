pub mod commands;
pub mod serve;
pub mod list;
pub mod bundle;
pub mod validate;

pub use commands::{Cli, Commands};
