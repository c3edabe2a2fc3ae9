//! Groups configurations used throughout the pool client passed to the CLI

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

mod cli;
pub mod parsing;
pub mod validation;

pub use cli::*;
pub use parsing::parse_command_line_args;
