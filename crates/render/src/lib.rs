//! # pifgen-render
//!
//! Turns persisted run outputs into documents. The [`blocks`] module is a
//! best-effort structural parser for the constrained Markdown dialect the
//! drafting prompts ask for; [`pdf`] lays the resulting blocks out on a
//! paginated canvas; [`markdown`] assembles the plain-text variant.

pub mod blocks;
pub mod markdown;
pub mod pdf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to parse built-in font '{0}'")]
    Font(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
