//! Template engine for generated stores.
//!
//! Templates are plain text with actions between `{{` and `}}`:
//!
//! | action                      | effect                                        |
//! |-----------------------------|-----------------------------------------------|
//! | `{{ name }}`                | value of a context variable                   |
//! | `{{ if name }}`             | following block only if the value is non-empty |
//! | `{{ else }}` / `{{ end }}`  | alternative branch / close the `if`           |
//! | `{{ "text" }}`              | `text` verbatim, e.g. `{{ "{{" }}`            |
//!
//! `{{-` removes the whitespace before an action and `-}}` the whitespace
//! after it. Variables are checked when the template is parsed, so a parsed
//! template always renders.

mod context;

use std::fs;
use std::path::Path;

use crate::error::TemplateError;

pub use context::{TemplateContext, Variable};

const DEFAULT_STORE: &str = include_str!("../../templates/store.rs.tmpl");

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Variable(Variable),
    If {
        variable: Variable,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

/// A parsed, validated template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

/// An `if` block still waiting for its `end`.
struct OpenBlock {
    variable: Variable,
    line: usize,
    then: Vec<Node>,
    otherwise: Option<Vec<Node>>,
}

impl OpenBlock {
    fn branch(&mut self) -> &mut Vec<Node> {
        self.otherwise.as_mut().unwrap_or(&mut self.then)
    }
}

struct Parser {
    root: Vec<Node>,
    open: Vec<OpenBlock>,
}

impl Parser {
    fn current(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut() {
            Some(block) => block.branch(),
            None => &mut self.root,
        }
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let nodes = self.current();
        if let Some(Node::Text(previous)) = nodes.last_mut() {
            previous.push_str(text);
        } else {
            nodes.push(Node::Text(text.to_string()));
        }
    }

    fn action(&mut self, action: &str, line: usize) -> Result<(), TemplateError> {
        let syntax = |message: String| TemplateError::Syntax { line, message };

        if let Some(literal) = action
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
        {
            self.push_text(literal);
            return Ok(());
        }

        let words: Vec<&str> = action.split_whitespace().collect();
        match words.as_slice() {
            [] => Err(syntax("empty action".to_string())),
            ["if", name] => {
                let variable = variable(name, line)?;
                self.open.push(OpenBlock {
                    variable,
                    line,
                    then: Vec::new(),
                    otherwise: None,
                });
                Ok(())
            }
            ["if"] => Err(syntax("`if` needs a variable".to_string())),
            ["else"] => match self.open.last_mut() {
                Some(block) if block.otherwise.is_none() => {
                    block.otherwise = Some(Vec::new());
                    Ok(())
                }
                Some(_) => Err(syntax("second `else` in one `if`".to_string())),
                None => Err(syntax("`else` outside of an `if`".to_string())),
            },
            ["end"] => {
                let block = self
                    .open
                    .pop()
                    .ok_or_else(|| syntax("`end` without an open `if`".to_string()))?;
                self.current().push(Node::If {
                    variable: block.variable,
                    then: block.then,
                    otherwise: block.otherwise.unwrap_or_default(),
                });
                Ok(())
            }
            [name] => {
                let variable = variable(name, line)?;
                self.current().push(Node::Variable(variable));
                Ok(())
            }
            _ => Err(syntax(format!("unexpected action `{action}`"))),
        }
    }
}

fn variable(name: &str, line: usize) -> Result<Variable, TemplateError> {
    Variable::from_name(name).ok_or_else(|| TemplateError::UnknownVariable {
        line,
        name: name.to_string(),
    })
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

impl Template {
    /// Parse and validate template text.
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let mut parser = Parser {
            root: Vec::new(),
            open: Vec::new(),
        };
        let mut rest = text;
        let mut offset = 0;
        let mut trim_next = false;

        while let Some(start) = rest.find("{{") {
            let line = line_of(text, offset + start);
            let after_open = &rest[start + 2..];
            let end = after_open
                .find("}}")
                .ok_or_else(|| TemplateError::Syntax {
                    line,
                    message: "unterminated action, missing `}}`".to_string(),
                })?;

            let mut action = &after_open[..end];
            let mut before = &rest[..start];
            if trim_next {
                before = before.trim_start();
            }
            if let Some(stripped) = action.strip_prefix('-') {
                before = before.trim_end();
                action = stripped;
            }
            trim_next = false;
            if let Some(stripped) = action.strip_suffix('-') {
                trim_next = true;
                action = stripped;
            }

            parser.push_text(before);
            parser.action(action.trim(), line)?;

            let consumed = start + 2 + end + 2;
            offset += consumed;
            rest = &rest[consumed..];
        }

        let tail = if trim_next { rest.trim_start() } else { rest };
        parser.push_text(tail);

        if let Some(block) = parser.open.last() {
            return Err(TemplateError::Syntax {
                line: block.line,
                message: "`if` is never closed with `end`".to_string(),
            });
        }
        Ok(Self { nodes: parser.root })
    }

    /// Read and parse a template file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// The built-in store template.
    pub fn default_store() -> Self {
        // The embedded text is checked by `default_template_parses`.
        Self::parse(DEFAULT_STORE).unwrap_or_else(|e| panic!("built-in template is invalid: {e}"))
    }

    /// Text of the built-in store template, e.g. as a starting point for a
    /// custom one.
    pub fn default_store_text() -> &'static str {
        DEFAULT_STORE
    }

    /// Render with `context`. Pure: the same template and context always
    /// produce the same text.
    pub fn render(&self, context: &TemplateContext) -> String {
        let mut out = String::new();
        render_nodes(&self.nodes, context, &mut out);
        out
    }
}

fn render_nodes(nodes: &[Node], context: &TemplateContext, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Variable(variable) => out.push_str(&context.value(*variable)),
            Node::If {
                variable,
                then,
                otherwise,
            } => {
                let branch = if context.value(*variable).is_empty() {
                    otherwise
                } else {
                    then
                };
                render_nodes(branch, context, out);
            }
        }
    }
}
