// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod csv;
pub mod error;
pub mod extract;
pub mod model;

pub use error::ExtractError;
pub use extract::{
    ExtractMode, ExtractOptions, ModeKind, extract_block_templates, extract_dated,
    extract_from_bytes, extract_weekly,
};
