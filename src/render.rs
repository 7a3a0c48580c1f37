//! Text emission for synthesized trees.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::syntax::{ContainerNode, NamespaceNode, RootNode, SyntaxNode};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Whitespace settings for [`RootNode::render`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Spaces per nesting level.
    pub indent_width: usize,
    pub line_ending: LineEnding,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            line_ending: LineEnding::Lf,
        }
    }
}

struct Writer<'a> {
    options: &'a FormatOptions,
    out: String,
}

impl Writer<'_> {
    fn line(&mut self, depth: usize, text: &str) {
        if !text.is_empty() {
            self.out
                .extend(std::iter::repeat_n(' ', depth * self.options.indent_width));
            self.out.push_str(text);
        }
        self.out.push_str(self.options.line_ending.as_str());
    }

    fn items(&mut self, depth: usize, items: &[SyntaxNode]) {
        let mut first = true;
        for item in items {
            // Whitespace-only members emit nothing, separator included.
            if matches!(item, SyntaxNode::Member(m) if m.lines().all(|l| l.trim().is_empty())) {
                continue;
            }
            if !first {
                self.line(0, "");
            }
            first = false;
            match item {
                SyntaxNode::Namespace(ns) => self.namespace(depth, ns),
                SyntaxNode::Container(c) => self.container(depth, c),
                SyntaxNode::Member(m) => {
                    for text in m.lines() {
                        self.line(depth, text.trim_end());
                    }
                }
            }
        }
    }

    fn namespace(&mut self, depth: usize, ns: &NamespaceNode) {
        self.line(depth, &format!("namespace {}", ns.name));
        self.line(depth, "{");
        self.items(depth + 1, &ns.items);
        self.line(depth, "}");
    }

    fn container(&mut self, depth: usize, c: &ContainerNode) {
        self.line(depth, &declaration_header(c));
        self.line(depth, "{");
        self.items(depth + 1, &c.items);
        self.line(depth, "}");
    }
}

/// `partial class Name<T> : Base` (modifier, keyword, type parameters, bases).
fn declaration_header(c: &ContainerNode) -> String {
    let mut header = String::new();
    if c.is_partial {
        header.push_str("partial ");
    }
    header.push_str(c.kind.keyword());
    header.push(' ');
    header.push_str(&c.name);
    if !c.type_parameters.is_empty() {
        header.push('<');
        header.push_str(&c.type_parameters.join(", "));
        header.push('>');
    }
    if !c.bases.is_empty() {
        let bases: Vec<&str> = c.bases.iter().map(|b| b.as_str()).collect();
        header.push_str(" : ");
        header.push_str(&bases.join(", "));
    }
    header
}

impl RootNode {
    /// Serialize the tree to source text.
    ///
    /// Rendering is a pure function of the tree and `options`, so equal
    /// trees produce byte-identical text.
    pub fn render(&self, options: &FormatOptions) -> String {
        let mut writer = Writer {
            options,
            out: String::new(),
        };
        for directive in &self.header {
            writer.line(0, directive.text());
        }
        writer.items(0, &self.items);
        writer.out
    }
}

impl fmt::Display for RootNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&FormatOptions::default()))
    }
}
