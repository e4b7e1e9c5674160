//! Tree-to-text serialization.
//!
//! The writer walks an arranged element tree and re-emits source text:
//! preserved header text and bodies verbatim, declarations reconstructed
//! from semantic fields, indentation per the tab-style configuration.

pub mod writer;

pub use writer::CodeWriter;
