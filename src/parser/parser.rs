//! Recursive-descent parser for C# source text.
//!
//! The parser consumes a [`LookaheadReader`] character by character and
//! produces a forest of [`CodeElement`]s. Constructs that the next character
//! alone cannot classify (auto-property vs. accessor-bodied property, `=`
//! initializer vs. `=>` expression body, generic argument list vs. stray
//! `<`) are resolved by scanning forward with `peek_ahead`; scanned
//! characters land in the stream's FIFO and are replayed by `read`, so the
//! parser never backtracks over consumed text.
//!
//! Malformed input fails fast with the offending line/column; there is no
//! error recovery within a file.

use std::io::BufRead;

use crate::error::{ArrangeError, Result};
use crate::model::{CodeAccess, CodeElement, ElementKind, PropertyDetails, TypeKind};
use crate::parser::stream::LookaheadReader;

/// Non-access declaration modifiers, kept in source order on the element.
const MODIFIERS: &[&str] = &[
    "static", "sealed", "abstract", "virtual", "override", "readonly", "const", "partial", "new",
    "extern", "unsafe", "async", "volatile", "implicit", "explicit", "required",
];

/// Recursive-descent parser for one C# source file.
#[derive(Debug, Default)]
pub struct CSharpParser;

impl CSharpParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse one file's source text into top-level elements
    /// (usings, namespaces, types) in source order.
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<Vec<CodeElement>> {
        let mut state = ParserState::new(LookaheadReader::new(reader));
        state.parse_file()
    }
}

/// Parse a string of C# source (convenience for tests and callers that
/// already hold the full text).
pub fn parse_str(source: &str) -> Result<Vec<CodeElement>> {
    CSharpParser::new().parse(source.as_bytes())
}

/// Shared leading state of a declaration being parsed.
struct DeclParts {
    header: String,
    indent: usize,
    access: CodeAccess,
    modifiers: Vec<String>,
}

impl DeclParts {
    fn apply_to(self, element: &mut CodeElement) {
        element.header_text = self.header;
        element.source_indent = self.indent;
        element.access = self.access;
        element.modifiers = self.modifiers;
    }
}

struct ParserState<R: BufRead> {
    reader: LookaheadReader<R>,
    line: usize,
    column: usize,
}

impl<R: BufRead> ParserState<R> {
    fn new(reader: LookaheadReader<R>) -> Self {
        Self {
            reader,
            line: 1,
            column: 1,
        }
    }

    // ---------------------------------------------------------------------
    // Character-level helpers
    // ---------------------------------------------------------------------

    /// Read one character, tracking line/column for error reporting.
    fn next(&mut self) -> Result<Option<char>> {
        let c = self.reader.read()?;
        match c {
            Some('\n') => {
                self.line += 1;
                self.column = 1;
            }
            Some(_) => self.column += 1,
            None => {}
        }
        Ok(c)
    }

    fn peek(&mut self) -> Result<Option<char>> {
        Ok(self.reader.peek()?)
    }

    fn peek_ahead(&mut self) -> Result<Option<char>> {
        Ok(self.reader.peek_ahead()?)
    }

    fn err(&self, message: impl Into<String>) -> ArrangeError {
        ArrangeError::parse(self.line, self.column, message)
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.next()? {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.err(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.err(format!("expected '{expected}', found end of file"))),
        }
    }

    /// Consume whitespace (including newlines).
    fn skip_ws(&mut self) -> Result<()> {
        while let Some(c) = self.peek()? {
            if !c.is_whitespace() {
                break;
            }
            self.next()?;
        }
        Ok(())
    }

    /// Consume whitespace and return it verbatim.
    fn capture_ws(&mut self) -> Result<String> {
        let mut ws = String::new();
        while let Some(c) = self.peek()? {
            if !c.is_whitespace() {
                break;
            }
            ws.push(c);
            self.next()?;
        }
        Ok(ws)
    }

    /// Scan forward to the next non-whitespace character without consuming
    /// anything; scanned characters replay through `read`.
    fn scan_nonws(&mut self) -> Result<Option<char>> {
        loop {
            match self.peek_ahead()? {
                Some(c) if c.is_whitespace() => {}
                other => return Ok(other),
            }
        }
    }

    fn read_word(&mut self) -> Result<String> {
        let mut word = String::new();
        while let Some(c) = self.peek()? {
            if c.is_alphanumeric() || c == '_' || c == '@' || c == '.' {
                word.push(c);
                self.next()?;
            } else {
                break;
            }
        }
        if word.is_empty() {
            match self.peek()? {
                Some(c) => Err(self.err(format!("expected identifier, found '{c}'"))),
                None => Err(self.err("expected identifier, found end of file")),
            }
        } else {
            Ok(word)
        }
    }

    // ---------------------------------------------------------------------
    // Verbatim text capture (string/char/comment aware)
    // ---------------------------------------------------------------------

    /// Finish a string literal whose opening quote is the last char of `out`.
    /// `verbatim` strings (`@"..."`) escape quotes by doubling.
    fn finish_string(&mut self, out: &mut String, verbatim: bool) -> Result<()> {
        loop {
            match self.next()? {
                Some('\\') if !verbatim => {
                    out.push('\\');
                    if let Some(escaped) = self.next()? {
                        out.push(escaped);
                    }
                }
                Some('"') => {
                    out.push('"');
                    if verbatim && self.peek()? == Some('"') {
                        out.push('"');
                        self.next()?;
                        continue;
                    }
                    return Ok(());
                }
                Some(c) => out.push(c),
                None => return Err(self.err("unterminated string literal")),
            }
        }
    }

    fn finish_char_literal(&mut self, out: &mut String) -> Result<()> {
        loop {
            match self.next()? {
                Some('\\') => {
                    out.push('\\');
                    if let Some(escaped) = self.next()? {
                        out.push(escaped);
                    }
                }
                Some('\'') => {
                    out.push('\'');
                    return Ok(());
                }
                Some(c) => out.push(c),
                None => return Err(self.err("unterminated character literal")),
            }
        }
    }

    /// Whether a `"` just pushed onto `out` opens a verbatim string, judged
    /// from the preceding `@` / `$@` / `@$` prefix characters.
    fn quote_is_verbatim(out: &str) -> bool {
        let mut chars = out.chars().rev().skip(1); // skip the quote itself
        match chars.next() {
            Some('@') => true,
            Some('$') => chars.next() == Some('@'),
            _ => false,
        }
    }

    /// Handle one character inside verbatim capture: pushes `c` and consumes
    /// through any literal or comment it opens. Returns `true` if `c` was the
    /// start of a literal/comment (already fully captured).
    fn capture_opaque(&mut self, c: char, out: &mut String) -> Result<bool> {
        match c {
            '"' => {
                out.push('"');
                let verbatim = Self::quote_is_verbatim(out);
                self.finish_string(out, verbatim)?;
                Ok(true)
            }
            '\'' => {
                out.push('\'');
                self.finish_char_literal(out)?;
                Ok(true)
            }
            '/' => {
                out.push('/');
                match self.peek()? {
                    Some('/') => {
                        while let Some(n) = self.peek()? {
                            if n == '\n' {
                                break;
                            }
                            out.push(n);
                            self.next()?;
                        }
                        Ok(true)
                    }
                    Some('*') => {
                        out.push('*');
                        self.next()?;
                        let mut prev = '\0';
                        loop {
                            match self.next()? {
                                Some(n) => {
                                    out.push(n);
                                    if prev == '*' && n == '/' {
                                        break;
                                    }
                                    prev = n;
                                }
                                None => return Err(self.err("unterminated block comment")),
                            }
                        }
                        Ok(true)
                    }
                    _ => Ok(true), // plain division, already pushed
                }
            }
            _ => {
                out.push(c);
                Ok(false)
            }
        }
    }

    /// Capture a balanced block verbatim, including both delimiters.
    /// Expects `peek` to be at the opening delimiter.
    fn read_balanced(&mut self, open: char, close: char) -> Result<String> {
        self.expect(open)?;
        let mut out = String::new();
        out.push(open);
        let mut depth = 1usize;
        loop {
            match self.next()? {
                Some(c) if c == open => {
                    out.push(c);
                    depth += 1;
                }
                Some(c) if c == close => {
                    out.push(c);
                    depth -= 1;
                    if depth == 0 {
                        return Ok(out);
                    }
                }
                Some(c) => {
                    self.capture_opaque(c, &mut out)?;
                }
                None => return Err(self.err(format!("expected '{close}', found end of file"))),
            }
        }
    }

    /// Capture expression text verbatim up to the terminating `;` at bracket
    /// depth zero. The `;` is consumed but not included.
    fn read_expression(&mut self) -> Result<String> {
        let mut out = String::new();
        let mut parens = 0usize;
        let mut brackets = 0usize;
        let mut braces = 0usize;
        loop {
            match self.next()? {
                Some(';') if parens == 0 && brackets == 0 && braces == 0 => return Ok(out),
                Some(c) => {
                    match c {
                        '(' => parens += 1,
                        ')' => parens = parens.saturating_sub(1),
                        '[' => brackets += 1,
                        ']' => brackets = brackets.saturating_sub(1),
                        '{' => braces += 1,
                        '}' => braces = braces.saturating_sub(1),
                        _ => {}
                    }
                    self.capture_opaque(c, &mut out)?;
                }
                None => return Err(self.err("expected ';', found end of file")),
            }
        }
    }

    /// Capture raw text up to (not including) an opening `{` at paren depth
    /// zero. Used for base lists and constructor initializers.
    fn read_until_open_brace(&mut self) -> Result<String> {
        let mut out = String::new();
        let mut parens = 0usize;
        loop {
            match self.peek()? {
                Some('{') if parens == 0 => return Ok(out),
                Some(_) => {
                    let c = self.next()?.unwrap();
                    match c {
                        '(' => parens += 1,
                        ')' => parens = parens.saturating_sub(1),
                        _ => {}
                    }
                    self.capture_opaque(c, &mut out)?;
                }
                None => return Err(self.err("expected '{', found end of file")),
            }
        }
    }

    /// Consume the rest of the current line: trailing spaces, an optional
    /// trailing comment, and the newline. Returns the comment (with its
    /// leading spacing) when one was present.
    fn consume_line_tail(&mut self) -> Result<Option<String>> {
        let mut spacing = String::new();
        loop {
            match self.peek()? {
                Some(' ' | '\t') => {
                    spacing.push(self.next()?.unwrap());
                }
                Some('\r') => {
                    self.next()?;
                }
                Some('\n') => {
                    self.next()?;
                    return Ok(None);
                }
                Some('/') => {
                    let mut comment = spacing;
                    comment.push('/');
                    self.next()?;
                    match self.peek()? {
                        Some('/') => {
                            while let Some(c) = self.peek()? {
                                if c == '\n' {
                                    self.next()?;
                                    break;
                                }
                                comment.push(c);
                                self.next()?;
                            }
                            return Ok(Some(comment));
                        }
                        Some('*') => {
                            comment.push('*');
                            self.next()?;
                            let mut prev = '\0';
                            loop {
                                match self.next()? {
                                    Some(c) => {
                                        comment.push(c);
                                        if prev == '*' && c == '/' {
                                            break;
                                        }
                                        prev = c;
                                    }
                                    None => return Ok(Some(comment)),
                                }
                            }
                            if self.peek()? == Some('\n') {
                                self.next()?;
                            }
                            return Ok(Some(comment));
                        }
                        _ => return Ok(Some(comment)),
                    }
                }
                _ => return Ok(None),
            }
        }
    }

    // ---------------------------------------------------------------------
    // Header collection
    // ---------------------------------------------------------------------

    /// Accumulate everything up to the next declaration token: whitespace
    /// runs, comments, XML docs, preprocessor lines and attribute lists, all
    /// verbatim. Returns the header text and the indent (in columns) of the
    /// line the next declaration starts on.
    fn collect_header(&mut self) -> Result<(String, usize)> {
        let mut buf = String::new();
        loop {
            match self.peek()? {
                Some(c) if c.is_whitespace() || c == '\u{feff}' => {
                    buf.push(c);
                    self.next()?;
                }
                Some('/') => {
                    self.next()?;
                    buf.push('/');
                    match self.peek()? {
                        Some('/') => {
                            while let Some(c) = self.peek()? {
                                buf.push(c);
                                self.next()?;
                                if c == '\n' {
                                    break;
                                }
                            }
                        }
                        Some('*') => {
                            buf.push('*');
                            self.next()?;
                            let mut prev = '\0';
                            loop {
                                match self.next()? {
                                    Some(c) => {
                                        buf.push(c);
                                        if prev == '*' && c == '/' {
                                            break;
                                        }
                                        prev = c;
                                    }
                                    None => return Err(self.err("unterminated block comment")),
                                }
                            }
                        }
                        _ => return Err(self.err("expected comment after '/'")),
                    }
                }
                Some('#') => {
                    // preprocessor line: #region, #endregion, #pragma, #if...
                    while let Some(c) = self.peek()? {
                        buf.push(c);
                        self.next()?;
                        if c == '\n' {
                            break;
                        }
                    }
                }
                Some('[') => {
                    let attr = self.read_balanced('[', ']')?;
                    buf.push_str(&attr);
                }
                _ => break,
            }
        }
        let last_line_start = buf.rfind('\n').map_or(0, |i| i + 1);
        let indent = buf[last_line_start..]
            .chars()
            .take_while(|c| c.is_whitespace())
            .count();
        Ok((buf, indent))
    }

    // ---------------------------------------------------------------------
    // Lookahead classification
    // ---------------------------------------------------------------------

    /// Forward-scan an angle-bracket group to confirm it is a generic
    /// argument/parameter list. Leaves all scanned characters buffered.
    fn scan_generic_args(&mut self) -> Result<bool> {
        let mut depth = 0usize;
        loop {
            match self.peek_ahead()? {
                Some('<') => depth += 1,
                Some('>') => {
                    if depth == 0 {
                        return Ok(false);
                    }
                    depth -= 1;
                    if depth == 0 {
                        return Ok(true);
                    }
                }
                Some(c)
                    if c.is_alphanumeric()
                        || c.is_whitespace()
                        || matches!(c, '_' | '.' | ',' | '?' | '[' | ']' | '@' | '*' | '(' | ')') => {}
                _ => return Ok(false),
            }
        }
    }

    /// Forward-scan a property's brace block to decide whether it is an
    /// auto-property: accessors only, no bodies, no expressions. Leaves all
    /// scanned characters buffered for normal consumption.
    fn scan_auto_property(&mut self) -> Result<bool> {
        // position: whitespace already consumed, peek is '{'
        match self.peek_ahead()? {
            Some('{') => {}
            _ => return Ok(false),
        }
        loop {
            match self.peek_ahead()? {
                Some('}') => return Ok(true),
                Some(c) if c.is_alphanumeric() || c.is_whitespace() => {}
                Some(';' | '_' | '[' | ']') => {}
                // any brace, expression, call or comment means backing logic
                _ => return Ok(false),
            }
        }
    }

    // ---------------------------------------------------------------------
    // Declarations
    // ---------------------------------------------------------------------

    fn parse_file(&mut self) -> Result<Vec<CodeElement>> {
        let mut elements = Vec::new();
        loop {
            let (header, indent) = self.collect_header()?;
            match self.peek()? {
                None => {
                    push_leftover_comment(&mut elements, header);
                    return Ok(elements);
                }
                Some(_) => {
                    let element = self.parse_declaration(header, indent, None)?;
                    elements.push(element);
                }
            }
        }
    }

    /// Parse the members of a brace-delimited scope up to and including the
    /// closing `}`. Call with the opening `{` already consumed; the rest of
    /// the `{` line is consumed here so member headers start at line starts.
    fn parse_scope(&mut self, enclosing: Option<&str>) -> Result<Vec<CodeElement>> {
        let mut seed = String::new();
        if let Some(comment) = self.consume_line_tail()? {
            // a comment on the `{` line travels with the first member
            seed = format!("{}\n", comment.trim_start());
        }
        let mut elements = Vec::new();
        loop {
            let (mut header, indent) = self.collect_header()?;
            if !seed.is_empty() {
                header = format!("{}{}", std::mem::take(&mut seed), header);
            }
            match self.peek()? {
                Some('}') => {
                    self.next()?;
                    push_leftover_comment(&mut elements, header);
                    return Ok(elements);
                }
                Some(';') => {
                    // stray semicolon; keep any header for the next member
                    self.next()?;
                    seed = header;
                }
                Some(_) => {
                    let element = self.parse_declaration(header, indent, enclosing)?;
                    elements.push(element);
                }
                None => return Err(self.err("expected '}', found end of file")),
            }
        }
    }

    /// Classify and parse one declaration. `enclosing` is the name of the
    /// containing type when inside a type body, `None` at file/namespace
    /// level.
    fn parse_declaration(
        &mut self,
        header: String,
        indent: usize,
        enclosing: Option<&str>,
    ) -> Result<CodeElement> {
        let mut parts = DeclParts {
            header,
            indent,
            access: CodeAccess::NotSpecified,
            modifiers: Vec::new(),
        };
        loop {
            self.skip_ws()?;
            match self.peek()? {
                Some('~') if enclosing.is_some() => {
                    return self.parse_destructor(parts);
                }
                Some(c) if c.is_alphabetic() || c == '_' || c == '@' => {
                    let word = self.read_word()?;
                    match word.as_str() {
                        "public" => parts.access = CodeAccess::Public,
                        "private" => parts.access = CodeAccess::Private,
                        "protected" if parts.access == CodeAccess::Internal => {
                            parts.access = CodeAccess::ProtectedInternal;
                        }
                        "protected" if parts.access == CodeAccess::Private => {
                            parts.modifiers.push(word);
                        }
                        "protected" => parts.access = CodeAccess::Protected,
                        "internal" if parts.access == CodeAccess::Protected => {
                            parts.access = CodeAccess::ProtectedInternal;
                        }
                        "internal" => parts.access = CodeAccess::Internal,
                        m if MODIFIERS.contains(&m) => parts.modifiers.push(word),
                        "using" if enclosing.is_none() => return self.parse_using(parts),
                        "namespace" if enclosing.is_none() => return self.parse_namespace(parts),
                        "class" => return self.parse_type(parts, TypeKind::Class),
                        "struct" => return self.parse_type(parts, TypeKind::Struct),
                        "interface" => return self.parse_type(parts, TypeKind::Interface),
                        "enum" => return self.parse_type(parts, TypeKind::Enum),
                        "delegate" => return self.parse_delegate(parts),
                        "event" if enclosing.is_some() => return self.parse_event(parts),
                        _ if enclosing.is_some() => {
                            return self.parse_member(parts, word, enclosing);
                        }
                        _ => {
                            return Err(self.err(format!(
                                "expected 'using', 'namespace' or a type declaration, found '{word}'"
                            )));
                        }
                    }
                }
                Some(c) => {
                    return Err(self.err(format!("expected declaration, found '{c}'")));
                }
                None => return Err(self.err("expected declaration, found end of file")),
            }
        }
    }

    fn parse_using(&mut self, parts: DeclParts) -> Result<CodeElement> {
        self.skip_ws()?;
        let mut is_static = false;
        let mut first = self.read_type_token()?;
        if first == "static" {
            is_static = true;
            self.skip_ws()?;
            first = self.read_type_token()?;
        }
        self.skip_ws()?;
        let (name, alias) = if self.peek()? == Some('=') {
            self.next()?;
            self.skip_ws()?;
            let target = self.read_type_token()?;
            (target, Some(first))
        } else {
            (first, None)
        };
        self.skip_ws()?;
        self.expect(';')?;
        let trailing = self.consume_line_tail()?;

        let mut element = CodeElement::new(ElementKind::Using { alias, is_static }, name);
        parts.apply_to(&mut element);
        element.trailing_comment = trailing;
        Ok(element)
    }

    fn parse_namespace(&mut self, parts: DeclParts) -> Result<CodeElement> {
        self.skip_ws()?;
        let name = self.read_word()?;
        self.skip_ws()?;
        match self.peek()? {
            Some('{') => {
                self.next()?;
                let children = self.parse_scope(None)?;
                let trailing = self.consume_line_tail()?;
                let mut element = CodeElement::new(ElementKind::Namespace, name);
                parts.apply_to(&mut element);
                element.children = children;
                element.trailing_comment = trailing;
                Ok(element)
            }
            Some(c) => Err(self.err(format!("expected '{{' after namespace name, found '{c}'"))),
            None => Err(self.err("expected '{' after namespace name, found end of file")),
        }
    }

    fn parse_type(&mut self, parts: DeclParts, kind: TypeKind) -> Result<CodeElement> {
        self.skip_ws()?;
        let name = self.read_word()?;
        let type_params = if self.peek()? == Some('<') {
            if !self.scan_generic_args()? {
                return Err(self.err("expected generic parameter list"));
            }
            Some(self.read_balanced('<', '>')?)
        } else {
            None
        };

        // everything up to the brace: base list, constraints
        let clause_raw = self.read_until_open_brace()?;
        let gap_start = clause_raw.trim_end().len();
        let gap = clause_raw[gap_start..].to_string();
        let clause = clause_raw.trim().to_string();
        let base_list = if clause.is_empty() { None } else { Some(clause) };

        let mut element;
        if kind == TypeKind::Enum {
            // enum members are preserved verbatim, not modeled
            let body = format!("{}{}", gap, self.read_balanced('{', '}')?);
            element = CodeElement::new(
                ElementKind::Type {
                    kind,
                    type_params,
                    base_list,
                    body: Some(body),
                },
                name,
            );
        } else {
            self.expect('{')?;
            let children = self.parse_scope(Some(name.as_str()))?;
            element = CodeElement::new(
                ElementKind::Type {
                    kind,
                    type_params,
                    base_list,
                    body: None,
                },
                name,
            );
            element.children = children;
        }
        let trailing = self.consume_line_tail()?;
        parts.apply_to(&mut element);
        element.trailing_comment = trailing;
        Ok(element)
    }

    fn parse_delegate(&mut self, parts: DeclParts) -> Result<CodeElement> {
        self.skip_ws()?;
        let mut tokens = vec![self.read_type_token()?];
        loop {
            self.skip_ws()?;
            match self.peek()? {
                Some('(') => break,
                Some(c) if c.is_alphabetic() || c == '_' || c == '@' => {
                    tokens.push(self.read_type_token()?);
                }
                Some(c) => return Err(self.err(format!("expected '(' in delegate, found '{c}'"))),
                None => return Err(self.err("expected '(' in delegate, found end of file")),
            }
        }
        if tokens.len() < 2 {
            return Err(self.err("expected return type and name in delegate declaration"));
        }
        let name = tokens.pop().unwrap();
        let return_type = tokens.join(" ");
        let params = self.read_params()?;
        self.skip_ws()?;
        self.expect(';')?;
        let trailing = self.consume_line_tail()?;

        let mut element = CodeElement::new(
            ElementKind::Delegate {
                return_type,
                params,
            },
            name,
        );
        parts.apply_to(&mut element);
        element.trailing_comment = trailing;
        Ok(element)
    }

    fn parse_event(&mut self, parts: DeclParts) -> Result<CodeElement> {
        self.skip_ws()?;
        let mut tokens = vec![self.read_type_token()?];
        loop {
            self.skip_ws()?;
            match self.peek()? {
                Some(';') => {
                    self.next()?;
                    break;
                }
                Some('{') => {
                    // custom add/remove accessors
                    let body = self.read_balanced('{', '}')?;
                    let trailing = self.consume_line_tail()?;
                    let name = tokens.pop().unwrap();
                    let type_name = tokens.join(" ");
                    let mut element = CodeElement::new(
                        ElementKind::Event {
                            type_name,
                            body: Some(body),
                        },
                        name,
                    );
                    parts.apply_to(&mut element);
                    element.trailing_comment = trailing;
                    return Ok(element);
                }
                Some(c) if c.is_alphabetic() || c == '_' || c == '@' => {
                    tokens.push(self.read_type_token()?);
                }
                Some(',') => {
                    self.next()?;
                    tokens.push(",".to_string());
                }
                Some(c) => return Err(self.err(format!("unexpected '{c}' in event declaration"))),
                None => return Err(self.err("unterminated event declaration")),
            }
        }
        if tokens.len() < 2 {
            return Err(self.err("expected type and name in event declaration"));
        }
        let name = join_declarators(&tokens.split_off(1));
        let type_name = tokens.join(" ");
        let trailing = self.consume_line_tail()?;
        let mut element = CodeElement::new(
            ElementKind::Event {
                type_name,
                body: None,
            },
            name,
        );
        parts.apply_to(&mut element);
        element.trailing_comment = trailing;
        Ok(element)
    }

    fn parse_destructor(&mut self, parts: DeclParts) -> Result<CodeElement> {
        self.expect('~')?;
        let name = format!("~{}", self.read_word()?);
        self.skip_ws()?;
        self.expect('(')?;
        self.skip_ws()?;
        self.expect(')')?;
        let gap = self.capture_ws()?;
        let body = format!("{}{}", gap, self.read_balanced('{', '}')?);
        let trailing = self.consume_line_tail()?;
        let mut element = CodeElement::new(ElementKind::Destructor { body }, name);
        parts.apply_to(&mut element);
        element.trailing_comment = trailing;
        Ok(element)
    }

    /// Parse a field, property, method or constructor. `first_word` is the
    /// first non-modifier word already consumed.
    fn parse_member(
        &mut self,
        parts: DeclParts,
        first_word: String,
        enclosing: Option<&str>,
    ) -> Result<CodeElement> {
        if first_word == "operator" {
            // conversion operator: implicit/explicit were taken as modifiers
            return self.parse_operator(parts, Vec::new());
        }
        let mut tokens = vec![first_word];
        let mut index_parameter: Option<String> = None;
        loop {
            // whitespace before the body brace is part of the verbatim body
            let gap = self.capture_ws()?;
            match self.peek()? {
                Some('(') => return self.parse_invocable(parts, tokens, enclosing),
                Some('{') => {
                    return self.parse_property(parts, tokens, index_parameter, None, gap);
                }
                Some('=') => {
                    self.next()?;
                    if self.peek()? == Some('>') {
                        self.next()?;
                        // expression-bodied property
                        let expr_raw = self.read_expression()?;
                        return self.parse_property(
                            parts,
                            tokens,
                            index_parameter,
                            Some(expr_raw),
                            String::new(),
                        );
                    }
                    // field with initializer
                    let init_raw = self.read_expression()?;
                    return self.finish_field(parts, tokens, Some(init_raw));
                }
                Some(';') => {
                    self.next()?;
                    return self.finish_field(parts, tokens, None);
                }
                Some('[') => {
                    if tokens.last().is_some_and(|t| t == "this" || t.ends_with(".this")) {
                        let raw = self.read_balanced('[', ']')?;
                        index_parameter = Some(raw[1..raw.len() - 1].trim().to_string());
                    } else {
                        // array type suffix
                        let raw = self.read_balanced('[', ']')?;
                        if let Some(last) = tokens.last_mut() {
                            last.push_str(&raw);
                        }
                    }
                }
                Some('<') => {
                    if !self.scan_generic_args()? {
                        return Err(self.err("unexpected '<' in declaration"));
                    }
                    let raw = self.read_balanced('<', '>')?;
                    if let Some(last) = tokens.last_mut() {
                        last.push_str(&raw);
                    }
                }
                Some('?' | '*') => {
                    let c = self.next()?.unwrap();
                    if let Some(last) = tokens.last_mut() {
                        last.push(c);
                    }
                }
                Some(',') => {
                    self.next()?;
                    tokens.push(",".to_string());
                }
                Some(c) if c.is_alphabetic() || c == '_' || c == '@' => {
                    let word = self.read_word()?;
                    if word == "operator" {
                        return self.parse_operator(parts, tokens);
                    }
                    tokens.push(word);
                }
                Some(c) => return Err(self.err(format!("unexpected '{c}' in declaration"))),
                None => return Err(self.err("unterminated declaration")),
            }
        }
    }

    fn finish_field(
        &mut self,
        parts: DeclParts,
        mut tokens: Vec<String>,
        initializer_raw: Option<String>,
    ) -> Result<CodeElement> {
        if tokens.len() < 2 {
            return Err(self.err("expected type and name in field declaration"));
        }
        let name = join_declarators(&tokens.split_off(1));
        let type_name = tokens.join(" ");
        let trailing = self.consume_line_tail()?;
        let mut element = CodeElement::new(
            ElementKind::Field {
                type_name,
                initializer: initializer_raw.map(|raw| raw.trim().to_string()),
            },
            name,
        );
        parts.apply_to(&mut element);
        element.trailing_comment = trailing;
        Ok(element)
    }

    fn parse_property(
        &mut self,
        parts: DeclParts,
        mut tokens: Vec<String>,
        index_parameter: Option<String>,
        expression_raw: Option<String>,
        gap: String,
    ) -> Result<CodeElement> {
        if tokens.len() < 2 && index_parameter.is_none() {
            return Err(self.err("expected type and name in property declaration"));
        }
        let name = tokens.pop().unwrap();
        let type_name = tokens.join(" ");

        let mut details = PropertyDetails {
            index_parameter,
            ..PropertyDetails::default()
        };

        if let Some(raw) = expression_raw {
            details.is_expression_bodied = true;
            details.expression_body = Some(raw.trim().to_string());
            let trailing = self.consume_line_tail()?;
            let mut element = CodeElement::new(
                ElementKind::Property {
                    type_name,
                    details,
                    body: None,
                },
                name,
            );
            parts.apply_to(&mut element);
            element.trailing_comment = trailing;
            return Ok(element);
        }

        // brace-form property: decide auto vs. backing logic by lookahead
        let is_auto = self.scan_auto_property()?;
        let block = self.read_balanced('{', '}')?;
        let mut body = format!("{gap}{block}");

        if is_auto {
            let interior = &block[1..block.len() - 1];
            let accessors: Vec<String> = interior
                .split(';')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
                .collect();
            details.auto_accessors = Some(
                accessors
                    .iter()
                    .map(|a| format!("{a};"))
                    .collect::<Vec<_>>()
                    .join(" "),
            );
            // optional inline initializer after the accessor block
            if self.scan_nonws()? == Some('=') {
                let gap = self.capture_ws()?;
                self.expect('=')?;
                let init_raw = self.read_expression()?;
                details.auto_initializer = Some(init_raw.trim().to_string());
                body.push_str(&gap);
                body.push('=');
                body.push_str(&init_raw);
                body.push(';');
            }
        }

        let trailing = self.consume_line_tail()?;
        let mut element = CodeElement::new(
            ElementKind::Property {
                type_name,
                details,
                body: Some(body),
            },
            name,
        );
        parts.apply_to(&mut element);
        element.trailing_comment = trailing;
        Ok(element)
    }

    /// Parse a method or constructor once `(` has been reached.
    fn parse_invocable(
        &mut self,
        parts: DeclParts,
        mut tokens: Vec<String>,
        enclosing: Option<&str>,
    ) -> Result<CodeElement> {
        let name_token = tokens
            .pop()
            .ok_or_else(|| self.err("expected name before '('"))?;
        let params = self.read_params()?;

        // constructor: bare type name, no return type
        let is_constructor = tokens.is_empty() && enclosing == Some(name_token.as_str());
        if is_constructor {
            return self.finish_constructor(parts, name_token, params);
        }
        if tokens.is_empty() {
            return Err(self.err(format!(
                "expected return type before '{name_token}' (or constructor of the enclosing type)"
            )));
        }

        let (name, type_params) = split_generic_name(name_token);
        let return_type = tokens.join(" ");
        self.finish_method(parts, name, type_params, return_type, params)
    }

    fn finish_constructor(
        &mut self,
        parts: DeclParts,
        name: String,
        params: String,
    ) -> Result<CodeElement> {
        let gap = self.capture_ws()?;
        let mut body = gap;
        let mut initializer = None;
        if self.peek()? == Some(':') {
            let init_raw = self.read_until_open_brace()?;
            initializer = Some(init_raw.trim().trim_start_matches(':').trim().to_string());
            body.push_str(&init_raw);
        }
        body.push_str(&self.read_balanced('{', '}')?);
        let trailing = self.consume_line_tail()?;
        let mut element = CodeElement::new(
            ElementKind::Constructor {
                params,
                initializer,
                body,
            },
            name,
        );
        parts.apply_to(&mut element);
        element.trailing_comment = trailing;
        Ok(element)
    }

    fn finish_method(
        &mut self,
        parts: DeclParts,
        name: String,
        type_params: Option<String>,
        return_type: String,
        params: String,
    ) -> Result<CodeElement> {
        let gap = self.capture_ws()?;
        let mut constraints = None;
        let mut body = None;
        let mut expression_body = None;
        match self.peek()? {
            Some('w') => {
                // where constraints, captured raw up to the body or terminator
                let raw = self.read_constraints()?;
                constraints = Some(raw);
                let gap2 = self.capture_ws()?;
                match self.peek()? {
                    Some('{') => {
                        body = Some(format!("{}{}", gap2, self.read_balanced('{', '}')?));
                    }
                    Some(';') => {
                        self.next()?;
                    }
                    Some('=') => {
                        self.next()?;
                        self.expect('>')?;
                        let raw = self.read_expression()?;
                        expression_body = Some(raw.trim().to_string());
                    }
                    Some(c) => {
                        return Err(self.err(format!("expected method body, found '{c}'")));
                    }
                    None => return Err(self.err("expected method body, found end of file")),
                }
            }
            Some('{') => {
                body = Some(format!("{}{}", gap, self.read_balanced('{', '}')?));
            }
            Some(';') => {
                self.next()?;
            }
            Some('=') => {
                self.next()?;
                self.expect('>')?;
                let raw = self.read_expression()?;
                expression_body = Some(raw.trim().to_string());
            }
            Some(c) => return Err(self.err(format!("expected method body, found '{c}'"))),
            None => return Err(self.err("expected method body, found end of file")),
        }
        let trailing = self.consume_line_tail()?;
        let mut element = CodeElement::new(
            ElementKind::Method {
                return_type,
                type_params,
                params,
                constraints,
                body,
                expression_body,
            },
            name,
        );
        parts.apply_to(&mut element);
        element.trailing_comment = trailing;
        Ok(element)
    }

    fn parse_operator(&mut self, parts: DeclParts, tokens: Vec<String>) -> Result<CodeElement> {
        // capture the operator symbol or target type up to '('
        let mut symbol = String::new();
        loop {
            match self.peek()? {
                Some('(') => break,
                Some(c) => {
                    symbol.push(c);
                    self.next()?;
                }
                None => return Err(self.err("expected '(' in operator declaration")),
            }
        }
        let name = format!("operator {}", symbol.trim());
        let return_type = tokens.join(" ");
        let params = self.read_params()?;
        self.finish_method(parts, name, None, return_type, params)
    }

    /// Read a parenthesized parameter list, returning the interior verbatim.
    fn read_params(&mut self) -> Result<String> {
        let raw = self.read_balanced('(', ')')?;
        Ok(raw[1..raw.len() - 1].to_string())
    }

    /// Read `where` constraint clauses raw, up to the body or terminator.
    fn read_constraints(&mut self) -> Result<String> {
        let mut out = String::new();
        loop {
            match self.peek()? {
                Some('{' | ';') => return Ok(out.trim_end().to_string()),
                Some('=') => return Ok(out.trim_end().to_string()),
                Some(c) => {
                    self.next()?;
                    self.capture_opaque(c, &mut out)?;
                }
                None => return Err(self.err("unterminated constraint clause")),
            }
        }
    }

    /// Read one type-like token: identifier with optional `::` qualifier,
    /// generic, array, nullable and pointer suffixes merged in.
    fn read_type_token(&mut self) -> Result<String> {
        let mut token = self.read_word()?;
        loop {
            match self.peek()? {
                Some(':') => {
                    // alias qualifier, e.g. global::System
                    self.next()?;
                    if self.peek()? != Some(':') {
                        return Err(self.err("expected '::' in qualified name"));
                    }
                    self.next()?;
                    token.push_str("::");
                    token.push_str(&self.read_word()?);
                }
                Some('<') => {
                    if !self.scan_generic_args()? {
                        break;
                    }
                    token.push_str(&self.read_balanced('<', '>')?);
                }
                Some('[') => {
                    token.push_str(&self.read_balanced('[', ']')?);
                }
                Some('?' | '*') => {
                    token.push(self.next()?.unwrap());
                }
                _ => break,
            }
        }
        Ok(token)
    }
}

/// Join declarator tokens back into `a, b` form.
fn join_declarators(tokens: &[String]) -> String {
    tokens.join(" ").replace(" ,", ",")
}

/// Split `Name<T>` into the base name and the generic suffix.
fn split_generic_name(token: String) -> (String, Option<String>) {
    match token.find('<') {
        Some(i) => {
            let generics = token[i..].to_string();
            (token[..i].to_string(), Some(generics))
        }
        None => (token, None),
    }
}

/// Turn leftover header text at the end of a scope into a comment element.
/// Pure-blank leftovers keep their blank lines; the indent of the closing
/// brace itself is dropped (the writer re-derives it).
fn push_leftover_comment(elements: &mut Vec<CodeElement>, header: String) {
    let text = if header.trim().is_empty() {
        let newlines = header.matches('\n').count();
        if newlines == 0 {
            return;
        }
        "\n".repeat(newlines)
    } else {
        header
    };
    let indent = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .map_or(0, |line| line.len() - line.trim_start().len());
    let mut comment = CodeElement::new(ElementKind::Comment { text }, String::new());
    comment.source_indent = indent;
    elements.push(comment);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(source: &str) -> CodeElement {
        let mut elements = parse_str(source).unwrap();
        assert_eq!(elements.len(), 1, "expected one top-level element");
        elements.remove(0)
    }

    #[test]
    fn test_using_directive() {
        let element = single("using System.IO;\n");
        assert_eq!(element.name, "System.IO");
        assert!(matches!(
            element.kind,
            ElementKind::Using {
                alias: None,
                is_static: false
            }
        ));
    }

    #[test]
    fn test_using_static_and_alias() {
        let elements = parse_str("using static System.Math;\nusing IO = System.IO;\n").unwrap();
        assert_eq!(elements.len(), 2);
        assert!(matches!(
            &elements[0].kind,
            ElementKind::Using { is_static: true, .. }
        ));
        match &elements[1].kind {
            ElementKind::Using { alias, .. } => assert_eq!(alias.as_deref(), Some("IO")),
            other => panic!("expected using, got {other:?}"),
        }
        assert_eq!(elements[1].name, "System.IO");
    }

    #[test]
    fn test_namespace_with_class() {
        let element = single("namespace Demo\n{\n    public class Widget\n    {\n    }\n}\n");
        assert_eq!(element.name, "Demo");
        assert!(matches!(element.kind, ElementKind::Namespace));
        assert_eq!(element.children.len(), 1);
        let class = &element.children[0];
        assert_eq!(class.name, "Widget");
        assert_eq!(class.access, CodeAccess::Public);
        assert!(matches!(
            class.kind,
            ElementKind::Type {
                kind: TypeKind::Class,
                ..
            }
        ));
    }

    #[test]
    fn test_field_with_initializer() {
        let element = single(
            "class C\n{\n    private static readonly int _count = 42; // cached\n}\n",
        );
        let field = &element.children[0];
        assert_eq!(field.name, "_count");
        assert_eq!(field.access, CodeAccess::Private);
        assert_eq!(field.modifiers, vec!["static", "readonly"]);
        match &field.kind {
            ElementKind::Field {
                type_name,
                initializer,
            } => {
                assert_eq!(type_name, "int");
                assert_eq!(initializer.as_deref(), Some("42"));
            }
            other => panic!("expected field, got {other:?}"),
        }
        assert_eq!(field.trailing_comment.as_deref(), Some(" // cached"));
    }

    #[test]
    fn test_multi_declarator_field() {
        let element = single("class C\n{\n    int a, b;\n}\n");
        assert_eq!(element.children[0].name, "a, b");
    }

    #[test]
    fn test_auto_property() {
        let element = single("class C\n{\n    public string Name { get; set; }\n}\n");
        let property = &element.children[0];
        match &property.kind {
            ElementKind::Property { details, .. } => {
                assert_eq!(details.auto_accessors.as_deref(), Some("get; set;"));
                assert!(!details.is_expression_bodied);
                assert!(details.auto_initializer.is_none());
            }
            other => panic!("expected property, got {other:?}"),
        }
    }

    #[test]
    fn test_multiline_auto_property() {
        let element = single(
            "class C\n{\n    public string Name\n    {\n        get;\n        set;\n    }\n}\n",
        );
        match &element.children[0].kind {
            ElementKind::Property { details, .. } => {
                assert_eq!(details.auto_accessors.as_deref(), Some("get; set;"));
            }
            other => panic!("expected property, got {other:?}"),
        }
    }

    #[test]
    fn test_auto_property_with_initializer() {
        let element =
            single("class C\n{\n    public string Name { get; } = \"unset\";\n}\n");
        match &element.children[0].kind {
            ElementKind::Property { details, .. } => {
                assert_eq!(details.auto_accessors.as_deref(), Some("get;"));
                assert_eq!(details.auto_initializer.as_deref(), Some("\"unset\""));
            }
            other => panic!("expected property, got {other:?}"),
        }
    }

    #[test]
    fn test_property_with_backing_logic_is_not_auto() {
        let source = "class C\n{\n    private int _x;\n    public int X\n    {\n        get { return _x; }\n        set { _x = value; }\n    }\n}\n";
        let element = single(source);
        match &element.children[1].kind {
            ElementKind::Property { details, body, .. } => {
                assert!(details.auto_accessors.is_none());
                assert!(body.as_deref().unwrap().contains("return _x;"));
            }
            other => panic!("expected property, got {other:?}"),
        }
    }

    #[test]
    fn test_expression_bodied_property_keeps_operator_text() {
        let element = single("class C\n{\n    public bool Big => _count > 10;\n}\n");
        match &element.children[0].kind {
            ElementKind::Property { details, .. } => {
                assert!(details.is_expression_bodied);
                assert_eq!(details.expression_body.as_deref(), Some("_count > 10"));
            }
            other => panic!("expected property, got {other:?}"),
        }
    }

    #[test]
    fn test_indexer() {
        let element = single(
            "class C\n{\n    public int this[int index]\n    {\n        get { return index; }\n    }\n}\n",
        );
        match &element.children[0].kind {
            ElementKind::Property { details, .. } => {
                assert_eq!(details.index_parameter.as_deref(), Some("int index"));
            }
            other => panic!("expected indexer property, got {other:?}"),
        }
    }

    #[test]
    fn test_method_with_body() {
        let element = single(
            "class C\n{\n    public int Add(int a, int b)\n    {\n        return a + b;\n    }\n}\n",
        );
        let method = &element.children[0];
        assert_eq!(method.name, "Add");
        match &method.kind {
            ElementKind::Method {
                return_type,
                params,
                body,
                ..
            } => {
                assert_eq!(return_type, "int");
                assert_eq!(params, "int a, int b");
                assert!(body.as_deref().unwrap().contains("return a + b;"));
            }
            other => panic!("expected method, got {other:?}"),
        }
    }

    #[test]
    fn test_generic_method() {
        let element =
            single("class C\n{\n    public T Identity<T>(T value) where T : class\n    {\n        return value;\n    }\n}\n");
        match &element.children[0].kind {
            ElementKind::Method {
                type_params,
                constraints,
                ..
            } => {
                assert_eq!(type_params.as_deref(), Some("<T>"));
                assert_eq!(constraints.as_deref(), Some("where T : class"));
            }
            other => panic!("expected method, got {other:?}"),
        }
    }

    #[test]
    fn test_interface_method_has_no_body() {
        let element = single("interface IWidget\n{\n    void Render();\n}\n");
        match &element.children[0].kind {
            ElementKind::Method { body, .. } => assert!(body.is_none()),
            other => panic!("expected method, got {other:?}"),
        }
    }

    #[test]
    fn test_constructor_with_initializer() {
        let element = single(
            "class Widget\n{\n    public Widget(int size)\n        : base(size)\n    {\n        _size = size;\n    }\n}\n",
        );
        let ctor = &element.children[0];
        assert_eq!(ctor.name, "Widget");
        match &ctor.kind {
            ElementKind::Constructor {
                params,
                initializer,
                body,
            } => {
                assert_eq!(params, "int size");
                assert_eq!(initializer.as_deref(), Some("base(size)"));
                assert!(body.contains("_size = size;"));
            }
            other => panic!("expected constructor, got {other:?}"),
        }
    }

    #[test]
    fn test_destructor() {
        let element = single("class Widget\n{\n    ~Widget()\n    {\n    }\n}\n");
        assert_eq!(element.children[0].name, "~Widget");
        assert!(matches!(
            element.children[0].kind,
            ElementKind::Destructor { .. }
        ));
    }

    #[test]
    fn test_event_and_delegate() {
        let element = single(
            "class C\n{\n    public event EventHandler Changed;\n    public delegate void Callback(int code);\n}\n",
        );
        assert!(matches!(element.children[0].kind, ElementKind::Event { .. }));
        match &element.children[1].kind {
            ElementKind::Delegate {
                return_type,
                params,
            } => {
                assert_eq!(return_type, "void");
                assert_eq!(params, "int code");
            }
            other => panic!("expected delegate, got {other:?}"),
        }
    }

    #[test]
    fn test_enum_body_is_preserved() {
        let element = single("enum Color\n{\n    Red,\n    Green, // favorite\n    Blue\n}\n");
        match &element.kind {
            ElementKind::Type {
                kind: TypeKind::Enum,
                body,
                ..
            } => {
                let body = body.as_deref().unwrap();
                assert!(body.contains("Green, // favorite"));
            }
            other => panic!("expected enum, got {other:?}"),
        }
    }

    #[test]
    fn test_header_text_travels_with_element() {
        let source = "class C\n{\n    /// <summary>\n    /// Count of widgets.\n    /// </summary>\n    [Obsolete]\n    public int Count { get; set; }\n}\n";
        let element = single(source);
        let property = &element.children[0];
        assert!(property.header_text.contains("/// Count of widgets."));
        assert!(property.header_text.contains("[Obsolete]"));
    }

    #[test]
    fn test_region_lines_are_preserved_as_header() {
        let source =
            "class C\n{\n    #region Fields\n    private int _a;\n    #endregion Fields\n}\n";
        let element = single(source);
        assert!(element.children[0].header_text.contains("#region Fields"));
        // the #endregion with no following declaration becomes a comment block
        assert!(matches!(
            element.children[1].kind,
            ElementKind::Comment { .. }
        ));
    }

    #[test]
    fn test_nested_classes_with_expression_bodied_properties() {
        let mut source = String::from("public class Outer\n{\n");
        for i in 0..4 {
            source.push_str(&format!(
                "    public class Nested{i}\n    {{\n        public int Plain{i} {{ get; set; }}\n        public bool Big{i} => Value{i} > {i};\n    }}\n"
            ));
        }
        source.push_str("}\n");

        let element = single(&source);
        assert_eq!(element.children.len(), 4);
        for (i, nested) in element.children.iter().enumerate() {
            assert_eq!(nested.children.len(), 2);
            match &nested.children[1].kind {
                ElementKind::Property { details, .. } => {
                    assert_eq!(
                        details.expression_body.as_deref(),
                        Some(format!("Value{i} > {i}").as_str())
                    );
                }
                other => panic!("expected property, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_string_with_brace_does_not_break_body_capture() {
        let element = single(
            "class C\n{\n    public string Render()\n    {\n        return \"}\";\n    }\n}\n",
        );
        match &element.children[0].kind {
            ElementKind::Method { body, .. } => {
                assert!(body.as_deref().unwrap().contains("return \"}\";"));
            }
            other => panic!("expected method, got {other:?}"),
        }
    }

    #[test]
    fn test_verbatim_string_in_body() {
        let element = single(
            "class C\n{\n    void F()\n    {\n        var p = @\"C:\\temp\\\"\"x\"\"\";\n    }\n}\n",
        );
        assert!(matches!(element.children[0].kind, ElementKind::Method { .. }));
    }

    #[test]
    fn test_parse_error_reports_position() {
        let err = parse_str("namespace Demo\n{\n    %\n}\n").unwrap_err();
        match err {
            ArrangeError::Parse { line, column, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, 5);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_class_fails() {
        let err = parse_str("class C\n{\n    int _x;\n").unwrap_err();
        assert!(matches!(err, ArrangeError::Parse { .. }));
        assert!(err.to_string().contains("expected '}'"));
    }

    #[test]
    fn test_statement_at_namespace_level_fails() {
        let err = parse_str("namespace N\n{\n    DoWork();\n}\n").unwrap_err();
        assert!(matches!(err, ArrangeError::Parse { .. }));
    }

    #[test]
    fn test_operator_overload() {
        let element = single(
            "class C\n{\n    public static bool operator >(C left, C right)\n    {\n        return false;\n    }\n}\n",
        );
        assert_eq!(element.children[0].name, "operator >");
    }

    #[test]
    fn test_nested_namespace() {
        let element = single("namespace Outer\n{\n    namespace Inner\n    {\n    }\n}\n");
        assert!(matches!(element.children[0].kind, ElementKind::Namespace));
        assert_eq!(element.children[0].name, "Inner");
    }

    #[test]
    fn test_source_indent_recorded() {
        let element = single("namespace N\n{\n    class C\n    {\n        int _x;\n    }\n}\n");
        let class = &element.children[0];
        assert_eq!(class.source_indent, 4);
        assert_eq!(class.children[0].source_indent, 8);
    }
}
