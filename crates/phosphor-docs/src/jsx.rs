//! Inline JSX parser for live code blocks.
//!
//! Handles the subset documentation snippets use: elements (self-closing or
//! with children), fragments, string / boolean / braced props, text, and
//! braced string-literal children. Other braced expressions are kept as
//! [`PropValue::Expression`] or dropped from children.

use std::sync::LazyLock;

use regex::Regex;

/// A node in a parsed snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsxNode {
    Element(JsxElement),
    Text(String),
}

/// An element such as `<Spinner size="LG" />`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsxElement {
    /// Tag name; empty for a fragment
    pub name: String,

    /// Props in source order
    pub props: Vec<(String, PropValue)>,

    pub children: Vec<JsxNode>,
}

impl JsxElement {
    pub fn is_fragment(&self) -> bool {
        self.name.is_empty()
    }

    /// Whether this names a component (capitalized) rather than an HTML tag.
    pub fn is_component(&self) -> bool {
        self.name.starts_with(|c: char| c.is_ascii_uppercase())
    }

    /// Concatenated text of all descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_text(nodes: &[JsxNode], out: &mut String) {
    for node in nodes {
        match node {
            JsxNode::Text(t) => out.push_str(t),
            JsxNode::Element(el) => collect_text(&el.children, out),
        }
    }
}

/// A prop value from JSX.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropValue {
    /// `size="LG"` or `size={"LG"}`
    String(String),
    /// `decorative`, `decorative={false}`
    Boolean(bool),
    /// `onClick={handler}`
    Expression(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JsxError {
    #[error("Unclosed element <{0}>")]
    Unclosed(String),

    #[error("Mismatched closing tag: expected </{expected}>, found </{found}>")]
    Mismatched { expected: String, found: String },

    #[error("Malformed JSX at offset {offset}: {message}")]
    Malformed { offset: usize, message: String },
}

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$:.\-]*").expect("Invalid JSX name regex")
});

/// Parse a snippet into its top-level nodes.
pub fn parse_jsx(source: &str) -> Result<Vec<JsxNode>, JsxError> {
    let mut cursor = Cursor {
        src: source,
        pos: 0,
    };
    parse_children(&mut cursor, None)
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn take_name(&mut self) -> &'a str {
        let rest = self.rest();
        let len = NAME_RE.find(rest).map(|m| m.end()).unwrap_or(0);
        self.pos += len;
        &rest[..len]
    }

    fn malformed(&self, message: &str) -> JsxError {
        JsxError::Malformed {
            offset: self.pos,
            message: message.to_string(),
        }
    }

    /// Consume a quoted string starting at the current quote character.
    fn take_quoted(&mut self) -> Result<&'a str, JsxError> {
        let rest = self.rest();
        let quote = rest
            .chars()
            .next()
            .ok_or_else(|| self.malformed("expected string"))?;
        let body = &rest[quote.len_utf8()..];
        let end = body
            .find(quote)
            .ok_or_else(|| self.malformed("unterminated string"))?;
        self.pos += quote.len_utf8() * 2 + end;
        Ok(&body[..end])
    }

    /// Consume `{ ... }` with balanced braces; returns the trimmed inside.
    fn take_braced(&mut self) -> Result<&'a str, JsxError> {
        let rest = self.rest();
        let mut depth = 0usize;
        let mut quote: Option<char> = None;

        for (i, c) in rest.char_indices() {
            match quote {
                Some(q) if c == q => quote = None,
                Some(_) => {}
                None => match c {
                    '"' | '\'' | '`' => quote = Some(c),
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            self.pos += i + 1;
                            return Ok(rest[1..i].trim());
                        }
                    }
                    _ => {}
                },
            }
        }

        Err(self.malformed("unbalanced braces"))
    }
}

fn parse_children(cursor: &mut Cursor<'_>, parent: Option<&str>) -> Result<Vec<JsxNode>, JsxError> {
    let mut nodes = Vec::new();

    loop {
        let rest = cursor.rest();

        if rest.is_empty() {
            return match parent {
                Some(name) => Err(JsxError::Unclosed(name.to_string())),
                None => Ok(nodes),
            };
        }

        if rest.starts_with("</") {
            let Some(expected) = parent else {
                return Err(cursor.malformed("closing tag without an open element"));
            };
            cursor.pos += 2;
            let found = cursor.take_name();
            cursor.skip_ws();
            if !cursor.eat(">") {
                return Err(cursor.malformed("expected '>'"));
            }
            if found != expected {
                return Err(JsxError::Mismatched {
                    expected: expected.to_string(),
                    found: found.to_string(),
                });
            }
            return Ok(nodes);
        }

        if rest.starts_with('<') {
            nodes.push(JsxNode::Element(parse_element(cursor)?));
            continue;
        }

        if rest.starts_with('{') {
            let expr = cursor.take_braced()?;
            if let Some(text) = string_literal(expr) {
                nodes.push(JsxNode::Text(text.to_string()));
            }
            continue;
        }

        let end = rest.find(['<', '{']).unwrap_or(rest.len());
        if let Some(text) = clean_text(&rest[..end]) {
            nodes.push(JsxNode::Text(text));
        }
        cursor.pos += end;
    }
}

/// Apply JSX whitespace rules to a raw text run.
///
/// Whitespace that touches a line break is removed and the remaining lines
/// are joined by one space. Whitespace within a single line is kept, so
/// `Press <Kbd>K</Kbd> to search` keeps the spaces around the key.
fn clean_text(raw: &str) -> Option<String> {
    let lines: Vec<&str> = raw.lines().collect();
    let last = lines.len().saturating_sub(1);
    // `lines` drops a trailing newline; it still ends the last line.
    let ends_with_break = raw.ends_with('\n');

    let kept: Vec<&str> = lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let line = if i > 0 { line.trim_start_matches([' ', '\t']) } else { line };
            if i < last || ends_with_break {
                line.trim_end_matches([' ', '\t', '\r'])
            } else {
                line
            }
        })
        .filter(|line| !line.is_empty())
        .collect();

    (!kept.is_empty()).then(|| kept.join(" "))
}

fn parse_element(cursor: &mut Cursor<'_>) -> Result<JsxElement, JsxError> {
    cursor.eat("<");
    let name = cursor.take_name().to_string();
    let mut props = Vec::new();

    loop {
        cursor.skip_ws();

        if cursor.eat("/>") {
            return Ok(JsxElement {
                name,
                props,
                children: Vec::new(),
            });
        }
        if cursor.eat(">") {
            break;
        }
        if name.is_empty() {
            return Err(cursor.malformed("fragments take no props"));
        }

        let prop = cursor.take_name();
        if prop.is_empty() {
            return Err(cursor.malformed("expected prop name"));
        }

        cursor.skip_ws();
        let value = if cursor.eat("=") {
            cursor.skip_ws();
            parse_value(cursor)?
        } else {
            PropValue::Boolean(true)
        };

        props.push((prop.to_string(), value));
    }

    let children = parse_children(cursor, Some(&name))?;

    Ok(JsxElement {
        name,
        props,
        children,
    })
}

fn parse_value(cursor: &mut Cursor<'_>) -> Result<PropValue, JsxError> {
    match cursor.rest().chars().next() {
        Some('"' | '\'') => Ok(PropValue::String(cursor.take_quoted()?.to_string())),
        Some('{') => {
            let expr = cursor.take_braced()?;
            Ok(match expr {
                "true" => PropValue::Boolean(true),
                "false" => PropValue::Boolean(false),
                _ => match string_literal(expr) {
                    Some(s) => PropValue::String(s.to_string()),
                    None => PropValue::Expression(expr.to_string()),
                },
            })
        }
        _ => Err(cursor.malformed("expected prop value")),
    }
}

/// `"x"`, `'x'` or `` `x` `` without interpolation.
fn string_literal(expr: &str) -> Option<&str> {
    let first = expr.chars().next()?;
    if !matches!(first, '"' | '\'' | '`') || expr.len() < 2 || !expr.ends_with(first) {
        return None;
    }
    let inner = &expr[1..expr.len() - 1];
    if inner.contains(first) || (first == '`' && inner.contains("${")) {
        return None;
    }
    Some(inner)
}
