//! Hierarchy descriptors: where a target type lives.
//!
//! A [`HierarchyDescriptor`] records the namespace of a target type and the
//! chain of types enclosing it, innermost first:
//!
//! ```text
//! namespace App.Models
//! {
//!     partial class Outer        // hierarchy[1]
//!     {
//!         partial struct Inner   // hierarchy[0], the target
//!         { ... }
//!     }
//! }
//! ```
//!
//! Descriptors are validated once at construction (or deserialization) and
//! are immutable afterwards, so one descriptor can drive any number of
//! synthesis passes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::guard::{self, GuardError};

/// Longest accepted type or namespace segment name.
pub const MAX_NAME_LEN: usize = 512;

/// Declaration kind of a container in the chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Interface,
    Record,
    RecordStruct,
}

impl TypeKind {
    /// Keyword(s) introducing a declaration of this kind.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Record => "record",
            Self::RecordStruct => "record struct",
        }
    }
}

/// One link in the enclosing-type chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainingType {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    /// Type parameter names; the arity is their count.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,
}

impl ContainingType {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            type_parameters: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Class, name)
    }

    pub fn structure(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Struct, name)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Interface, name)
    }

    pub fn record(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Record, name)
    }

    pub fn with_type_parameters<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_parameters = params.into_iter().map(Into::into).collect();
        self
    }

    /// Number of generic type parameters.
    pub fn arity(&self) -> usize {
        self.type_parameters.len()
    }

    fn validate(&self, index: usize) -> Result<(), DescriptorError> {
        let parameter = format!("hierarchy[{index}].name");
        guard::not_blank(&parameter, &self.name)?;
        guard::max_len(&parameter, &self.name, MAX_NAME_LEN)?;
        guard::identifier(&parameter, &self.name)?;
        guard::not_keyword(&parameter, &self.name)?;

        for (i, param) in self.type_parameters.iter().enumerate() {
            let parameter = format!("hierarchy[{index}].type_parameters[{i}]");
            guard::max_len(&parameter, param, MAX_NAME_LEN)?;
            guard::identifier(&parameter, param)?;
            guard::not_keyword(&parameter, param)?;
            if self.type_parameters[..i].contains(param) {
                return Err(DescriptorError::DuplicateTypeParameter {
                    owner: self.name.clone(),
                    name: param.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Errors raised while constructing a [`HierarchyDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("hierarchy must contain at least the target type")]
    EmptyChain,

    #[error("type '{owner}' declares type parameter '{name}' more than once")]
    DuplicateTypeParameter { owner: String, name: String },

    #[error(transparent)]
    Guard(#[from] GuardError),
}

/// Namespace plus enclosing-type chain of a target type.
///
/// Invariant: `hierarchy` is never empty. Index 0 is the target type itself,
/// the last index is the outermost type directly under the namespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDescriptor")]
pub struct HierarchyDescriptor {
    namespace: String,
    hierarchy: Vec<ContainingType>,
}

/// Unvalidated serde shape; converted through [`HierarchyDescriptor::new`].
#[derive(Deserialize)]
struct RawDescriptor {
    #[serde(default)]
    namespace: String,
    hierarchy: Vec<ContainingType>,
}

impl TryFrom<RawDescriptor> for HierarchyDescriptor {
    type Error = DescriptorError;

    fn try_from(raw: RawDescriptor) -> Result<Self, Self::Error> {
        Self::new(raw.namespace, raw.hierarchy)
    }
}

impl HierarchyDescriptor {
    /// Validate and build a descriptor.
    ///
    /// `namespace` may be empty for the global namespace; otherwise every
    /// dot-separated segment must be an identifier. `hierarchy` is ordered
    /// innermost first and must not be empty.
    pub fn new(
        namespace: impl Into<String>,
        hierarchy: Vec<ContainingType>,
    ) -> Result<Self, DescriptorError> {
        let namespace = namespace.into();

        if !namespace.is_empty() {
            guard::not_blank("namespace", &namespace)?;
            for segment in namespace.split('.') {
                guard::not_empty("namespace segment", segment)?;
                guard::max_len("namespace segment", segment, MAX_NAME_LEN)?;
                guard::identifier("namespace segment", segment)?;
                guard::not_keyword("namespace segment", segment)?;
            }
        }

        if hierarchy.is_empty() {
            return Err(DescriptorError::EmptyChain);
        }
        for (index, ty) in hierarchy.iter().enumerate() {
            ty.validate(index)?;
        }

        Ok(Self {
            namespace,
            hierarchy,
        })
    }

    /// Fully qualified namespace, empty for the global namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn is_global_namespace(&self) -> bool {
        self.namespace.is_empty()
    }

    /// The chain, innermost first.
    pub fn hierarchy(&self) -> &[ContainingType] {
        &self.hierarchy
    }

    /// Type names, innermost first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.hierarchy.iter().map(|t| t.name.as_str())
    }

    /// The target type (`hierarchy[0]`).
    pub fn innermost(&self) -> &ContainingType {
        &self.hierarchy[0]
    }

    /// Number of nested containers, always >= 1.
    pub fn depth(&self) -> usize {
        self.hierarchy.len()
    }

    /// Stable file-name stem: namespace, then types outermost to innermost,
    /// generic types suffixed with a backtick and their arity.
    ///
    /// `App.Models` / `[Inner, Outer<T>]` gives ``App.Models.Outer`1.Inner``.
    pub fn filename_hint(&self) -> String {
        let types = self.hierarchy.iter().rev().map(|ty| match ty.arity() {
            0 => ty.name.clone(),
            n => format!("{}`{}", ty.name, n),
        });

        if self.namespace.is_empty() {
            types.collect::<Vec<_>>().join(".")
        } else {
            std::iter::once(self.namespace.clone())
                .chain(types)
                .collect::<Vec<_>>()
                .join(".")
        }
    }

    /// File name under which a generated source for this descriptor is
    /// registered, e.g. `App.Models.Outer.Inner.g.cs` for suffix `g`.
    pub fn hint_name(&self, suffix: &str) -> String {
        format!("{}.{}.cs", self.filename_hint(), suffix)
    }
}
