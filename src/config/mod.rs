pub mod env;
pub mod parser;
pub mod types;

pub use parser::{load_settings, parse_config};
pub use types::*;
