//! Per-file arrangement pipeline.
//!
//! This module orchestrates the three stages for one source file:
//!
//! **Parse:** read the input into a typed element tree, preserving every
//! token that arrangement does not need (comments, attributes, blank lines).
//!
//! **Arrange:** rebuild sibling scopes per the configuration's rule tree:
//! grouping, stable sorting, optional region wrapping.
//!
//! **Write:** serialize the arranged tree, reproducing preserved text
//! verbatim and reconstructing declarations.
//!
//! The main entry point is [`arrange_source`], which reads a buffered reader
//! and writes arranged output to any `Write` implementation. Output is
//! buffered internally and flushed only on success; a failing stage leaves
//! the output untouched.

pub mod pipeline;

pub use pipeline::{arrange_source, arrange_str};
