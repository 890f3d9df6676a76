//! Import-path extraction for Go and Go+ build dependency analysis.
//!
//! [`ImportsParser`] reads the import header of each file it is given,
//! decodes every path literal, rewrites relative paths against the owning
//! [`Module`], and accumulates the results in a set.

pub mod config;
pub mod errors;
pub mod module;
pub mod output;
pub mod parse;
pub mod walk;

pub use errors::{GopdepsError, Result};
pub use module::{Module, ModuleResolver};
pub use parse::{FileSet, ImportsParser, ParseConfig};
