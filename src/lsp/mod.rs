//! LSP Protocol Implementation
//!
//! Runs the insert-header command inside any editor that speaks the
//! Language Server Protocol.

pub mod backend;
pub mod document;
pub mod editor;
pub mod handlers;
pub mod server;

pub use backend::Backend;
