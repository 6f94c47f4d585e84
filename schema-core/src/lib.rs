pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod fileio;
pub mod pipeline;
pub mod prompt;
pub mod schema;

pub use error::{RenderError, RenderErrorKind, Result, SchemaError};
