//! `CodeWriter` - serializes an element tree back to C# source text.
//!
//! For any element the arranger did not move, output is byte-identical to
//! the parsed input: header text and body text are stored verbatim and the
//! declaration is reconstructed with canonical single spacing. Elements that
//! changed nesting depth have their preserved text shifted by the indent
//! delta, keeping interior relative indentation intact.

use std::io::Write;

use crate::config::{Config, TabStyle};
use crate::error::Result;
use crate::model::{CodeElement, ElementKind, GroupSeparatorType, PropertyDetails};

/// Writes element trees using one configuration.
pub struct CodeWriter<'a> {
    config: &'a Config,
}

impl<'a> CodeWriter<'a> {
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Serialize `elements` to `output`.
    ///
    /// The tab style is resolved up front: an unrecognized configuration
    /// value fails with `InvalidOperation` before any output is produced.
    pub fn write<W: Write>(&self, elements: &[CodeElement], output: &mut W) -> Result<()> {
        let tab_style = self.config.resolve_tab_style()?;
        let (indent_unit, unit_width) = match tab_style {
            TabStyle::Tabs => ("\t".to_string(), 1),
            TabStyle::Spaces => (
                " ".repeat(self.config.spaces_per_tab),
                self.config.spaces_per_tab,
            ),
        };
        let mut emitter = Emitter {
            output,
            indent_unit,
            unit_width,
            regions_enabled: self.config.regions_enabled,
            inline_auto_properties: self.config.inline_auto_properties,
        };
        for element in elements {
            emitter.write_element(element, 0)?;
        }
        Ok(())
    }
}

struct Emitter<'w, W: Write> {
    output: &'w mut W,
    indent_unit: String,
    unit_width: usize,
    regions_enabled: bool,
    inline_auto_properties: bool,
}

impl<W: Write> Emitter<'_, W> {
    fn push(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }

    fn indent(&self, depth: usize) -> String {
        self.indent_unit.repeat(depth)
    }

    fn write_element(&mut self, element: &CodeElement, depth: usize) -> Result<()> {
        match &element.kind {
            ElementKind::Group { .. } => self.write_group(element, depth),
            ElementKind::Comment { text } => {
                let shifted = shift_indent(text, self.delta(element, depth), true);
                let trimmed = shifted.trim_end_matches([' ', '\t']);
                self.push(trimmed)?;
                if !trimmed.is_empty() && !trimmed.ends_with('\n') {
                    self.push("\n")?;
                }
                Ok(())
            }
            _ => self.write_declaration(element, depth),
        }
    }

    /// Groups have no declaration of their own: separator, optional region
    /// wrapper, then children at the same depth.
    fn write_group(&mut self, element: &CodeElement, depth: usize) -> Result<()> {
        let ElementKind::Group {
            separator,
            custom_separator,
            region_name,
        } = &element.kind
        else {
            unreachable!("write_group called on a non-group element");
        };

        if *separator == GroupSeparatorType::Custom {
            if let Some(text) = custom_separator {
                self.push(text)?;
                if !text.ends_with('\n') {
                    self.push("\n")?;
                }
            }
        }

        let region = region_name.as_deref().filter(|_| self.regions_enabled);
        if let Some(name) = region {
            self.push(&format!("{}#region {}\n", self.indent(depth), name))?;
        }
        for child in &element.children {
            self.write_element(child, depth)?;
        }
        if let Some(name) = region {
            self.push(&format!("{}#endregion {}\n", self.indent(depth), name))?;
        }
        Ok(())
    }

    /// Columns the element moved by, relative to where it sat in the source.
    fn delta(&self, element: &CodeElement, depth: usize) -> isize {
        let target = (depth * self.unit_width) as isize;
        target - element.source_indent as isize
    }

    fn write_declaration(&mut self, element: &CodeElement, depth: usize) -> Result<()> {
        let delta = self.delta(element, depth);

        // header text carries the element's own leading indentation when it
        // ends mid-line; otherwise the computed indent applies
        if !element.header_text.is_empty() {
            let shifted = shift_indent(&element.header_text, delta, true);
            self.push(&shifted)?;
        }
        if element.header_text.is_empty() || element.header_text.ends_with('\n') {
            self.push(&self.indent(depth))?;
        }

        let prefix = decl_prefix(element);
        match &element.kind {
            ElementKind::Using { alias, is_static } => {
                self.push("using ")?;
                if *is_static {
                    self.push("static ")?;
                }
                if let Some(alias) = alias {
                    self.push(alias)?;
                    self.push(" = ")?;
                }
                self.push(&element.name)?;
                self.push(";")?;
                self.finish_line(element)
            }
            ElementKind::Namespace => {
                self.push(&format!("namespace {}", element.name))?;
                self.write_block_children(element, depth)
            }
            ElementKind::Type {
                kind,
                type_params,
                base_list,
                body,
            } => {
                self.push(&prefix)?;
                self.push(kind.keyword())?;
                self.push(" ")?;
                self.push(&element.name)?;
                if let Some(generics) = type_params {
                    self.push(generics)?;
                }
                if let Some(clause) = base_list {
                    self.push(" ")?;
                    self.push(clause)?;
                }
                match body {
                    Some(body) => {
                        // enum: members preserved verbatim
                        self.push(&shift_indent(body, delta, false))?;
                        self.finish_line(element)
                    }
                    None => self.write_block_children(element, depth),
                }
            }
            ElementKind::Field {
                type_name,
                initializer,
            } => {
                self.push(&prefix)?;
                self.push(&format!("{type_name} {}", element.name))?;
                if let Some(init) = initializer {
                    self.push(&format!(" = {init}"))?;
                }
                self.push(";")?;
                self.finish_line(element)
            }
            ElementKind::Property {
                type_name,
                details,
                body,
            } => self.write_property(element, &prefix, type_name, details, body.as_deref(), delta),
            ElementKind::Method {
                return_type,
                type_params,
                params,
                constraints,
                body,
                expression_body,
            } => {
                self.push(&prefix)?;
                if !return_type.is_empty() {
                    self.push(return_type)?;
                    self.push(" ")?;
                }
                self.push(&element.name)?;
                if let Some(generics) = type_params {
                    self.push(generics)?;
                }
                self.push(&format!("({params})"))?;
                if let Some(clause) = constraints {
                    self.push(" ")?;
                    self.push(clause)?;
                }
                if let Some(body) = body {
                    self.push(&shift_indent(body, delta, false))?;
                } else if let Some(expr) = expression_body {
                    self.push(&format!(" => {expr};"))?;
                } else {
                    self.push(";")?;
                }
                self.finish_line(element)
            }
            ElementKind::Constructor { params, body, .. } => {
                self.push(&prefix)?;
                self.push(&format!("{}({params})", element.name))?;
                self.push(&shift_indent(body, delta, false))?;
                self.finish_line(element)
            }
            ElementKind::Destructor { body } => {
                self.push(&prefix)?;
                self.push(&format!("{}()", element.name))?;
                self.push(&shift_indent(body, delta, false))?;
                self.finish_line(element)
            }
            ElementKind::Event { type_name, body } => {
                self.push(&prefix)?;
                self.push(&format!("event {type_name} {}", element.name))?;
                match body {
                    Some(body) => self.push(&shift_indent(body, delta, false))?,
                    None => self.push(";")?,
                }
                self.finish_line(element)
            }
            ElementKind::Delegate {
                return_type,
                params,
            } => {
                self.push(&prefix)?;
                self.push(&format!(
                    "delegate {return_type} {}({params});",
                    element.name
                ))?;
                self.finish_line(element)
            }
            ElementKind::Comment { .. } | ElementKind::Group { .. } => {
                unreachable!("handled by write_element")
            }
        }
    }

    fn write_property(
        &mut self,
        element: &CodeElement,
        prefix: &str,
        type_name: &str,
        details: &PropertyDetails,
        body: Option<&str>,
        delta: isize,
    ) -> Result<()> {
        self.push(prefix)?;
        self.push(type_name)?;
        self.push(" ")?;
        match &details.index_parameter {
            Some(param) => self.push(&format!("{}[{param}]", element.name))?,
            None => self.push(&element.name)?,
        }

        if details.is_expression_bodied {
            let expr = details.expression_body.as_deref().unwrap_or_default();
            self.push(&format!(" => {expr};"))?;
        } else if self.inline_auto_properties && details.auto_accessors.is_some() {
            let accessors = details.auto_accessors.as_deref().unwrap_or_default();
            self.push(&format!(" {{ {accessors} }}"))?;
            if let Some(init) = &details.auto_initializer {
                self.push(&format!(" = {init};"))?;
            }
        } else if let Some(body) = body {
            self.push(&shift_indent(body, delta, false))?;
        } else {
            self.push(";")?;
        }
        self.finish_line(element)
    }

    /// Emit an Allman-style brace block containing the element's children.
    fn write_block_children(&mut self, element: &CodeElement, depth: usize) -> Result<()> {
        let indent = self.indent(depth);
        self.push(&format!("\n{indent}{{\n"))?;
        for child in &element.children {
            self.write_element(child, depth + 1)?;
        }
        self.push(&format!("{indent}}}"))?;
        self.finish_line(element)
    }

    fn finish_line(&mut self, element: &CodeElement) -> Result<()> {
        if let Some(comment) = &element.trailing_comment {
            self.push(comment)?;
        }
        self.push("\n")
    }
}

/// Access keywords and modifiers, each followed by one space.
fn decl_prefix(element: &CodeElement) -> String {
    let mut prefix = String::new();
    let access = element.access.keywords();
    if !access.is_empty() {
        prefix.push_str(access);
        prefix.push(' ');
    }
    for modifier in &element.modifiers {
        prefix.push_str(modifier);
        prefix.push(' ');
    }
    prefix
}

/// Shift the leading indentation of each line by `delta` columns. Blank
/// lines are untouched; a negative delta removes at most the whitespace that
/// is present. When `first_is_line_start` is false, the first segment
/// continues the current output line and is never shifted.
fn shift_indent(text: &str, delta: isize, first_is_line_start: bool) -> String {
    if delta == 0 {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    for (i, segment) in text.split_inclusive('\n').enumerate() {
        let at_line_start = first_is_line_start || i > 0;
        // blank lines stay blank; a trailing whitespace-only segment is the
        // next declaration's indent and shifts with everything else
        let is_blank_line = segment.trim().is_empty() && segment.ends_with('\n');
        if !at_line_start || is_blank_line {
            out.push_str(segment);
            continue;
        }
        if delta > 0 {
            for _ in 0..delta {
                out.push(' ');
            }
            out.push_str(segment);
        } else {
            let mut to_remove = delta.unsigned_abs();
            let mut rest = segment;
            while to_remove > 0 {
                match rest.strip_prefix([' ', '\t']) {
                    Some(stripped) => {
                        rest = stripped;
                        to_remove -= 1;
                    }
                    None => break,
                }
            }
            out.push_str(rest);
        }
    }
    out
}
