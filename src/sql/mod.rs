//! DDL parsing: `SHOW CREATE TABLE` text to the table model.

mod lexer;
mod parser;

pub use parser::{DdlError, parse_create_table};
