//! Page templates.
//!
//! A small subset of Go's `text/template` syntax, enough for the index and
//! topic pages of a runbook site:
//!
//! - `{{.}}`, `{{.Title}}`, `{{.A.B}}`: print a field of the current value
//! - `{{.Title | html}}`, `{{html .Title}}`, `{{.URL | urlquery}}`: escape
//! - `{{range .Runbooks}}...{{else}}...{{end}}`: loop, `.` is the element
//! - `{{if .Intro}}...{{else}}...{{end}}`: conditional on a non-empty value
//! - `{{/* comment */}}`
//! - `{{-` and `-}}` trim whitespace before and after the action
//!
//! Values print as they are, without escaping. Templates are executed
//! against a [`serde_json::Value`].

use std::fs;
use std::path::Path;

use memchr::memmem;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;

use crate::error::{Error, Result};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Characters left alone by `urlquery`. Space is turned into `+` afterwards.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b' ');

/// A parsed template.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    root: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Print(Pipeline),
    Range {
        pipeline: Pipeline,
        body: Vec<Node>,
        otherwise: Vec<Node>,
    },
    If {
        pipeline: Pipeline,
        body: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

/// A field reference followed by zero or more escaping functions.
#[derive(Debug, Clone, PartialEq)]
struct Pipeline {
    line: usize,
    /// Field names from the current value; empty for `.`.
    field: Vec<String>,
    funcs: Vec<Func>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Func {
    Html,
    UrlQuery,
}

impl Func {
    fn lookup(name: &str) -> Option<Self> {
        match name {
            "html" => Some(Func::Html),
            "urlquery" => Some(Func::UrlQuery),
            _ => None,
        }
    }

    fn apply(self, s: String) -> String {
        match self {
            Func::Html => html_escape(&s),
            Func::UrlQuery => utf8_percent_encode(&s, QUERY).to_string().replace(' ', "+"),
        }
    }
}

/// Escape like Go's `html` builtin: numeric references for quotes, and NUL
/// becomes U+FFFD.
fn html_escape(s: &str) -> String {
    quick_xml::escape::partial_escape(s)
        .replace('"', "&#34;")
        .replace('\'', "&#39;")
        .replace('\0', "\u{FFFD}")
}

/// Lexed piece of template source.
#[derive(Debug)]
enum Item<'s> {
    Text(&'s str),
    Action { line: usize, body: &'s str },
}

impl Template {
    /// Parse template source.
    pub fn parse(name: impl Into<String>, source: &str) -> Result<Self> {
        let name = name.into();
        let items = lex(&name, source)?;
        let mut parser = Parser {
            name: &name,
            items: items.into_iter(),
        };
        let (root, end) = parser.parse_list()?;
        if let Some((keyword, line)) = end {
            return Err(parse_error(&name, line, format!("unexpected {{{{{keyword}}}}}")));
        }
        Ok(Self { name, root })
    }

    /// Read and parse a template file. The file name becomes the template
    /// name.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::parse(name, &source)
    }

    /// The template's name, used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute the template against `data`.
    pub fn render(&self, data: &Value) -> Result<String> {
        let mut out = String::new();
        self.render_nodes(&self.root, data, &mut out)?;
        Ok(out)
    }

    fn render_nodes(&self, nodes: &[Node], dot: &Value, out: &mut String) -> Result<()> {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Print(pipeline) => out.push_str(&self.eval(pipeline, dot)?),
                Node::If {
                    pipeline,
                    body,
                    otherwise,
                } => {
                    let value = self.lookup(pipeline, dot)?;
                    let branch = if is_true(value) { body } else { otherwise };
                    self.render_nodes(branch, dot, out)?;
                }
                Node::Range {
                    pipeline,
                    body,
                    otherwise,
                } => {
                    let value = self.lookup(pipeline, dot)?;
                    let elements: Vec<&Value> = match value {
                        Value::Array(items) => items.iter().collect(),
                        Value::Object(map) => map.values().collect(),
                        Value::Null => Vec::new(),
                        other => {
                            return Err(self.exec_error(
                                pipeline.line,
                                format!("range can't iterate over {other}"),
                            ));
                        }
                    };
                    if elements.is_empty() {
                        self.render_nodes(otherwise, dot, out)?;
                    }
                    for element in elements {
                        self.render_nodes(body, element, out)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn lookup<'v>(&self, pipeline: &Pipeline, dot: &'v Value) -> Result<&'v Value> {
        let mut value = dot;
        for name in &pipeline.field {
            value = match value {
                Value::Object(map) => map.get(name).ok_or_else(|| {
                    self.exec_error(pipeline.line, format!("can't evaluate field {name}"))
                })?,
                other => {
                    return Err(self.exec_error(
                        pipeline.line,
                        format!("can't evaluate field {name} in type {}", kind(other)),
                    ));
                }
            };
        }
        Ok(value)
    }

    fn eval(&self, pipeline: &Pipeline, dot: &Value) -> Result<String> {
        let value = self.lookup(pipeline, dot)?;
        let printed = match value {
            Value::String(s) => s.clone(),
            Value::Null => "<no value>".to_string(),
            other => other.to_string(),
        };
        Ok(pipeline.funcs.iter().fold(printed, |s, f| f.apply(s)))
    }

    fn exec_error(&self, line: usize, message: String) -> Error {
        Error::TemplateExec {
            name: self.name.clone(),
            line,
            message,
        }
    }
}

fn parse_error(name: &str, line: usize, message: String) -> Error {
    Error::TemplateParse {
        name: name.to_string(),
        line,
        message,
    }
}

/// Go truthiness: zero values and empty collections are false.
fn is_true(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Split template source into text and action bodies, applying trim markers.
fn lex<'s>(name: &str, source: &'s str) -> Result<Vec<Item<'s>>> {
    let bytes = source.as_bytes();
    let mut items = Vec::new();
    let mut pos = 0;
    let mut line = 1;
    let mut trim_next = false;

    while let Some(offset) = memmem::find(&bytes[pos..], OPEN.as_bytes()) {
        let open = pos + offset;
        let mut text = &source[pos..open];
        if trim_next {
            text = text.trim_start();
        }
        line += memchr::memchr_iter(b'\n', &bytes[pos..open]).count();

        let body_start = open + OPEN.len();
        let close = memmem::find(&bytes[body_start..], CLOSE.as_bytes())
            .map(|offset| body_start + offset)
            .ok_or_else(|| parse_error(name, line, "unclosed action".to_string()))?;
        let mut body = &source[body_start..close];

        if let Some(rest) = body.strip_prefix('-')
            && rest.starts_with(char::is_whitespace)
        {
            text = text.trim_end();
            body = rest;
        }
        trim_next = false;
        if let Some(rest) = body.strip_suffix('-')
            && rest.ends_with(char::is_whitespace)
        {
            trim_next = true;
            body = rest;
        }

        if !text.is_empty() {
            items.push(Item::Text(text));
        }
        items.push(Item::Action {
            line,
            body: body.trim(),
        });

        line += memchr::memchr_iter(b'\n', &bytes[open..close]).count();
        pos = close + CLOSE.len();
    }

    let mut text = &source[pos..];
    if trim_next {
        text = text.trim_start();
    }
    if !text.is_empty() {
        items.push(Item::Text(text));
    }
    Ok(items)
}

struct Parser<'n, 's> {
    name: &'n str,
    items: std::vec::IntoIter<Item<'s>>,
}

impl Parser<'_, '_> {
    /// Parse nodes up to `{{else}}`, `{{end}}` or the end of input. Returns
    /// the terminating keyword and its line, if any.
    fn parse_list(&mut self) -> Result<(Vec<Node>, Option<(&'static str, usize)>)> {
        let mut nodes = Vec::new();
        while let Some(item) = self.items.next() {
            let (line, body) = match item {
                Item::Text(text) => {
                    nodes.push(Node::Text(text.to_string()));
                    continue;
                }
                Item::Action { line, body } => (line, body),
            };

            if body.starts_with("/*") {
                if !body.ends_with("*/") {
                    return Err(self.error(line, "unclosed comment"));
                }
                continue;
            }

            let (keyword, rest) = body
                .split_once(char::is_whitespace)
                .map_or((body, ""), |(k, r)| (k, r.trim()));
            match keyword {
                "end" | "else" if !rest.is_empty() => {
                    return Err(self.error(line, format!("unexpected {rest:?} in {keyword}")));
                }
                "end" => return Ok((nodes, Some(("end", line)))),
                "else" => return Ok((nodes, Some(("else", line)))),
                "range" | "if" => {
                    let pipeline = self.pipeline(line, rest)?;
                    let (body, otherwise) = self.parse_branches(line, keyword)?;
                    nodes.push(if keyword == "range" {
                        Node::Range {
                            pipeline,
                            body,
                            otherwise,
                        }
                    } else {
                        Node::If {
                            pipeline,
                            body,
                            otherwise,
                        }
                    });
                }
                _ => nodes.push(Node::Print(self.pipeline(line, body)?)),
            }
        }
        Ok((nodes, None))
    }

    /// Parse the body of a `range` or `if`, with an optional `else` branch.
    fn parse_branches(&mut self, line: usize, keyword: &str) -> Result<(Vec<Node>, Vec<Node>)> {
        let (body, end) = self.parse_list()?;
        match end {
            Some(("end", _)) => Ok((body, Vec::new())),
            Some((_, else_line)) => {
                let (otherwise, end) = self.parse_list()?;
                match end {
                    Some(("end", _)) => Ok((body, otherwise)),
                    Some((other, line)) => {
                        Err(self.error(line, format!("unexpected {{{{{other}}}}} after {{{{else}}}} at line {else_line}")))
                    }
                    None => Err(self.error(line, format!("unexpected EOF in {keyword}"))),
                }
            }
            None => Err(self.error(line, format!("unexpected EOF in {keyword}"))),
        }
    }

    fn pipeline(&self, line: usize, source: &str) -> Result<Pipeline> {
        let mut commands = source.split('|').map(str::trim);
        let first: Vec<&str> = commands.next().unwrap_or_default().split_whitespace().collect();

        let mut funcs = Vec::new();
        let field = match first.as_slice() {
            [field] => self.field(line, field)?,
            [func, field] => {
                funcs.push(self.func(line, func)?);
                self.field(line, field)?
            }
            [] => return Err(self.error(line, "missing value for command")),
            _ => return Err(self.error(line, format!("unsupported command {source:?}"))),
        };

        for command in commands {
            if command.is_empty() {
                return Err(self.error(line, "missing command after |"));
            }
            funcs.push(self.func(line, command)?);
        }

        Ok(Pipeline { line, field, funcs })
    }

    fn field(&self, line: usize, source: &str) -> Result<Vec<String>> {
        if source == "." {
            return Ok(Vec::new());
        }
        let Some(path) = source.strip_prefix('.') else {
            return Err(self.error(line, format!("expected field, found {source:?}")));
        };
        path.split('.')
            .map(|name| {
                let valid = !name.is_empty()
                    && name.chars().all(|c| c.is_alphanumeric() || c == '_');
                if valid {
                    Ok(name.to_string())
                } else {
                    Err(self.error(line, format!("bad field {source:?}")))
                }
            })
            .collect()
    }

    fn func(&self, line: usize, name: &str) -> Result<Func> {
        Func::lookup(name)
            .ok_or_else(|| self.error(line, format!("function {name:?} not defined")))
    }

    fn error(&self, line: usize, message: impl Into<String>) -> Error {
        parse_error(self.name, line, message.into())
    }
}
