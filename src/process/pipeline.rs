//! Parse → arrange → write pipeline for one file.

use std::io::{BufRead, Write};

use crate::arrange::CodeArranger;
use crate::config::Config;
use crate::error::Result;
use crate::parser::CSharpParser;
use crate::writer::CodeWriter;

/// Arrange one file's source text.
///
/// Reads `input` to completion, parses, arranges and serializes. The result
/// is staged in memory and written to `output` only after every stage
/// succeeded, so a parse or configuration failure never produces partial
/// output.
pub fn arrange_source<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    config: &Config,
) -> Result<()> {
    let elements = CSharpParser::new().parse(input)?;
    let arranger = CodeArranger::from_config(config)?;
    let arranged = arranger.arrange(elements)?;

    let mut buffer = Vec::new();
    CodeWriter::new(config).write(&arranged, &mut buffer)?;
    output.write_all(&buffer)?;
    Ok(())
}

/// Arrange a string of source text and return the arranged text.
pub fn arrange_str(source: &str, config: &Config) -> Result<String> {
    let mut output = Vec::new();
    arrange_source(source.as_bytes(), &mut output, config)?;
    // the writer only emits UTF-8 string data
    Ok(String::from_utf8_lossy(&output).into_owned())
}
