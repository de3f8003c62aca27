//! Helper functions shared by the parser and the templates

mod date;
mod html;

pub use date::*;
pub use html::*;
