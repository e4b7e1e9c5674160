//! C# source code parsing.
//!
//! This module provides the front half of the pipeline:
//! - [`LookaheadReader`]: character stream with unlimited peek-ahead
//! - [`CSharpParser`]: recursive-descent reader producing the element tree
//!
//! The parser classifies declarations while preserving every token that is
//! not needed for arrangement: comments, XML docs, attribute lists,
//! preprocessor lines and blank-line runs travel verbatim in each element's
//! header text, and bodies are captured verbatim for exact re-emission.

pub mod parser;
pub mod stream;

pub use parser::{parse_str, CSharpParser};
pub use stream::LookaheadReader;
