//! csarrange - Declarative arranger for C# source code
//!
//! Parses C# source into a typed element tree, rearranges the tree according
//! to configurable grouping/sorting/region rules, and re-emits faithful
//! source text.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::struct_excessive_bools)]

pub mod arrange;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod process;
pub mod writer;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::{Config, ElementRule, TabStyle};
pub use error::{ArrangeError, Result};
pub use model::{CodeAccess, CodeElement, ElementKind, TypeKind};
