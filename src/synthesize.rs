//! Hierarchy synthesis: rebuild the enclosing declarations of a target type
//! around a set of generated members.
//!
//! Given `App.Models` / `[Inner, Outer]` and one member, the result renders as:
//!
//! ```text
//! // <auto-generated/>
//! #pragma warning disable
//! #nullable enable
//! namespace App.Models
//! {
//!     partial class Outer
//!     {
//!         partial class Inner
//!         {
//!             int fieldX;
//!         }
//!     }
//! }
//! ```

use crate::descriptor::{ContainingType, HierarchyDescriptor};
use crate::syntax::{
    BaseRef, ContainerNode, HeaderDirective, MemberNode, NamespaceNode, RootNode, SyntaxNode,
};

fn partial_container(
    ty: &ContainingType,
    bases: Vec<BaseRef>,
    items: Vec<SyntaxNode>,
) -> ContainerNode {
    ContainerNode {
        kind: ty.kind,
        name: ty.name.clone(),
        type_parameters: ty.type_parameters.clone(),
        is_partial: true,
        bases,
        items,
    }
}

/// Wrap `members` in the namespace and partial type chain of `descriptor`.
///
/// The innermost declaration receives `members` in order and, if given,
/// `extra_bases` as its base list. Every enclosing level wraps exactly the
/// level below it and carries no base list. The returned root has the
/// generated-code header attached and is already normalized.
///
/// # Panics
///
/// Panics if the descriptor's chain is empty. The public constructors never
/// produce such a descriptor.
pub fn synthesize(
    descriptor: &HierarchyDescriptor,
    members: Vec<MemberNode>,
    extra_bases: Option<Vec<BaseRef>>,
) -> RootNode {
    let Some((innermost, enclosing)) = descriptor.hierarchy().split_first() else {
        panic!(
            "hierarchy descriptor for namespace '{}' has an empty type chain",
            descriptor.namespace()
        );
    };

    let member_count = members.len();
    let body = members.into_iter().map(SyntaxNode::Member).collect();
    let mut node = partial_container(innermost, extra_bases.unwrap_or_default(), body);

    for ty in enclosing {
        node = partial_container(ty, Vec::new(), vec![SyntaxNode::Container(node)]);
    }

    let top = if descriptor.is_global_namespace() {
        SyntaxNode::Container(node)
    } else {
        SyntaxNode::Namespace(NamespaceNode {
            name: descriptor.namespace().to_string(),
            items: vec![SyntaxNode::Container(node)],
        })
    };

    tracing::trace!(
        namespace = descriptor.namespace(),
        depth = descriptor.depth(),
        members = member_count,
        "synthesized hierarchy"
    );

    RootNode {
        header: HeaderDirective::GENERATED.to_vec(),
        items: vec![top],
    }
    .normalize()
}

impl HierarchyDescriptor {
    /// Method form of [`synthesize`].
    pub fn synthesize(
        &self,
        members: Vec<MemberNode>,
        extra_bases: Option<Vec<BaseRef>>,
    ) -> RootNode {
        synthesize(self, members, extra_bases)
    }
}
