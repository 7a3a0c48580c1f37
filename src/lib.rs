//! # nested-partials
//!
//! Rebuilds the enclosing declarations of a type so generated members can be
//! emitted into a `partial` part of it.
//!
//! A generator that wants to add members to `App.Models.Outer.Inner` cannot
//! emit `partial class Inner` on its own: the part has to sit inside the same
//! namespace and the same chain of enclosing types as the hand-written
//! declaration. This crate describes that chain once
//! ([`HierarchyDescriptor`]) and rebuilds it around any set of members
//! ([`synthesize`]).
//!
//! ```
//! use nested_partials::{ContainingType, HierarchyDescriptor, MemberNode};
//!
//! let descriptor = HierarchyDescriptor::new(
//!     "App.Models",
//!     vec![ContainingType::class("Inner"), ContainingType::class("Outer")],
//! )
//! .unwrap();
//!
//! let root = descriptor.synthesize(vec![MemberNode::new("int fieldX;")], None);
//! assert_eq!(root.nesting_depth(), 2);
//! assert!(root.to_string().contains("partial class Outer"));
//! assert_eq!(descriptor.hint_name("g"), "App.Models.Outer.Inner.g.cs");
//! ```
//!
//! ## Layout
//!
//! - [`descriptor`]: validated namespace + type chain, file-name hints
//! - [`synthesize`](mod@synthesize): the tree construction
//! - [`syntax`]: output tree and normalization
//! - [`render`]: text emission
//! - [`guard`]: string precondition checks

pub mod descriptor;
pub mod guard;
pub mod render;
pub mod syntax;
pub mod synthesize;

pub use descriptor::{ContainingType, DescriptorError, HierarchyDescriptor, TypeKind};
pub use guard::{GuardError, GuardResult};
pub use render::{FormatOptions, LineEnding};
pub use syntax::{
    BaseRef, ContainerNode, HeaderDirective, MemberNode, NamespaceNode, RootNode, SyntaxNode,
};
pub use synthesize::synthesize;
