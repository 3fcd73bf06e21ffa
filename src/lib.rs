//! Section Header Language Server
//!
//! Inserts decorative, comment-styled section headers around selected or
//! prompted text.
//!
//! This library provides:
//! - Comment style resolution per language identifier
//! - Fixed-width header generation
//! - Indentation detection for whitespace-sensitive languages
//! - The `sectionHeader.insertHeader` command over an injected host
//! - An LSP host adapter

pub mod command;
pub mod config;
pub mod header;
pub mod host;
pub mod indent;
pub mod lsp;
pub mod style;

// Re-exports for clean public API
pub use command::{CommandOutcome, INSERT_HEADER_COMMAND, insert_header};
pub use config::Config;
pub use header::{HEADER_WIDTH, generate};
pub use style::{CommentStyle, resolve};
