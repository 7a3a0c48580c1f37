//! Output tree produced by synthesis.
//!
//! The tree is deliberately small: a root carrying header directives, an
//! optional namespace, a chain of containers, and opaque member fragments at
//! the innermost level.

use crate::descriptor::TypeKind;
use crate::guard::{self, GuardResult};

/// Leading directive lines marking a file as generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeaderDirective {
    /// `// <auto-generated/>`
    AutoGenerated,
    /// `#pragma warning disable`
    DisableWarnings,
    /// `#nullable enable`
    NullableEnable,
}

impl HeaderDirective {
    /// Header attached to every synthesized root, in emission order.
    pub const GENERATED: [HeaderDirective; 3] = [
        HeaderDirective::AutoGenerated,
        HeaderDirective::DisableWarnings,
        HeaderDirective::NullableEnable,
    ];

    pub const fn text(self) -> &'static str {
        match self {
            Self::AutoGenerated => "// <auto-generated/>",
            Self::DisableWarnings => "#pragma warning disable",
            Self::NullableEnable => "#nullable enable",
        }
    }
}

/// A base type or interface reference, e.g. `IEquatable<Widget>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseRef(String);

impl BaseRef {
    pub fn new(reference: impl Into<String>) -> GuardResult<Self> {
        let reference = reference.into();
        guard::not_blank("base", &reference)?;
        Ok(Self(reference))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An already-rendered member declaration, kept as opaque source text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberNode {
    text: String,
}

impl MemberNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Canonical form of the fragment: `\n` line endings, no trailing
    /// whitespace, common indentation removed, at most one blank line in a
    /// row, no leading or trailing blank lines.
    pub fn normalized(&self) -> Self {
        let lines: Vec<&str> = self.text.lines().map(str::trim_end).collect();

        let indent = lines
            .iter()
            .filter(|l| !l.is_empty())
            .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
            .min()
            .unwrap_or(0);

        let mut out: Vec<&str> = Vec::with_capacity(lines.len());
        for line in lines {
            let line = match line.char_indices().nth(indent) {
                Some((at, _)) => &line[at..],
                None => "",
            };
            if line.is_empty() && out.last().is_none_or(|prev| prev.is_empty()) {
                continue;
            }
            out.push(line);
        }
        while out.last().is_some_and(|l| l.is_empty()) {
            out.pop();
        }

        Self {
            text: out.join("\n"),
        }
    }
}

/// A partial type declaration in the nesting chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContainerNode {
    pub kind: TypeKind,
    pub name: String,
    pub type_parameters: Vec<String>,
    /// Emitted with the `partial` modifier.
    pub is_partial: bool,
    /// Base list; only ever populated on the innermost container.
    pub bases: Vec<BaseRef>,
    pub items: Vec<SyntaxNode>,
}

impl ContainerNode {
    /// Members of this container, skipping nested containers.
    pub fn members(&self) -> impl Iterator<Item = &MemberNode> {
        self.items.iter().filter_map(|item| match item {
            SyntaxNode::Member(m) => Some(m),
            _ => None,
        })
    }

    /// The single nested container, if this level only wraps another one.
    pub fn nested(&self) -> Option<&ContainerNode> {
        match self.items.as_slice() {
            [SyntaxNode::Container(inner)] => Some(inner),
            _ => None,
        }
    }
}

/// A block-scoped namespace declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamespaceNode {
    pub name: String,
    pub items: Vec<SyntaxNode>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxNode {
    Namespace(NamespaceNode),
    Container(ContainerNode),
    Member(MemberNode),
}

impl SyntaxNode {
    fn normalized(self) -> Self {
        match self {
            Self::Namespace(ns) => Self::Namespace(NamespaceNode {
                name: ns.name.trim().to_string(),
                items: ns.items.into_iter().map(Self::normalized).collect(),
            }),
            Self::Container(c) => Self::Container(ContainerNode {
                name: c.name.trim().to_string(),
                type_parameters: c
                    .type_parameters
                    .into_iter()
                    .map(|p| p.trim().to_string())
                    .collect(),
                bases: c
                    .bases
                    .into_iter()
                    .map(|b| BaseRef(b.0.trim().to_string()))
                    .collect(),
                items: c.items.into_iter().map(Self::normalized).collect(),
                ..c
            }),
            Self::Member(m) => Self::Member(m.normalized()),
        }
    }
}

/// Root of a generated file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RootNode {
    pub header: Vec<HeaderDirective>,
    pub items: Vec<SyntaxNode>,
}

impl RootNode {
    /// Canonical whitespace pass. Idempotent.
    pub fn normalize(self) -> Self {
        Self {
            header: self.header,
            items: self.items.into_iter().map(SyntaxNode::normalized).collect(),
        }
    }

    /// Namespace wrapping the chain, `None` for the global namespace.
    pub fn namespace(&self) -> Option<&str> {
        self.items.iter().find_map(|item| match item {
            SyntaxNode::Namespace(ns) => Some(ns.name.as_str()),
            _ => None,
        })
    }

    /// The container chain, outermost first.
    pub fn containers(&self) -> Vec<&ContainerNode> {
        let top = self.items.iter().find_map(|item| match item {
            SyntaxNode::Namespace(ns) => ns.items.iter().find_map(|i| match i {
                SyntaxNode::Container(c) => Some(c),
                _ => None,
            }),
            SyntaxNode::Container(c) => Some(c),
            SyntaxNode::Member(_) => None,
        });

        let mut chain = Vec::new();
        let mut current = top;
        while let Some(container) = current {
            chain.push(container);
            current = container.nested();
        }
        chain
    }

    /// Number of nested containers.
    pub fn nesting_depth(&self) -> usize {
        self.containers().len()
    }

    /// The deepest container, which holds the members.
    pub fn innermost(&self) -> Option<&ContainerNode> {
        self.containers().last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_normalization_dedents_and_trims() {
        let m = MemberNode::new("\r\n\n    public int X { get; }   \r\n\r\n\r\n    // note\n        nested();\n\n");
        assert_eq!(
            m.normalized().text(),
            "public int X { get; }\n\n// note\n    nested();"
        );
    }

    #[test]
    fn member_normalization_is_idempotent() {
        let m = MemberNode::new("  a\n\n\n  b  ").normalized();
        assert_eq!(m.normalized(), m);
    }

    #[test]
    fn blank_member_normalizes_to_empty() {
        assert_eq!(MemberNode::new(" \n\t\n").normalized().text(), "");
    }

    #[test]
    fn base_ref_rejects_blank() {
        assert!(BaseRef::new("IWidget").is_ok());
        assert!(BaseRef::new("  ").is_err());
    }

    #[test]
    fn header_order_is_marker_then_directives() {
        let lines: Vec<_> = HeaderDirective::GENERATED.iter().map(|d| d.text()).collect();
        assert_eq!(
            lines,
            ["// <auto-generated/>", "#pragma warning disable", "#nullable enable"]
        );
    }
}
