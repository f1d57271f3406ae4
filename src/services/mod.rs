// Service exports
pub mod parser;

pub use parser::{parse_path, parse_reader, ParseError};
