//! TOML configuration parser for targets.toml.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use nested_partials::{
    BaseRef, ContainingType, FormatOptions, HierarchyDescriptor, MemberNode, TypeKind, guard,
};
use thiserror::Error;

/// Suffix inserted before `.cs` in hint names when none is configured.
pub const DEFAULT_SUFFIX: &str = "g";

/// Parsed targets configuration.
#[derive(Debug, Clone)]
pub struct TargetsConfig {
    /// Hint-name suffix, e.g. `g` for `App.Widget.g.cs`
    pub suffix: String,
    /// Whitespace settings for emitted files
    pub format: FormatOptions,
    targets: Vec<Target>,
}

/// One generated file: where it goes and what it adds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub descriptor: HierarchyDescriptor,
    pub bases: Option<Vec<BaseRef>>,
    pub members: Vec<MemberNode>,
}

/// Raw TOML structure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTargetsConfig {
    suffix: Option<String>,
    #[serde(default)]
    format: FormatOptions,
    #[serde(default, rename = "target")]
    targets: Vec<RawTarget>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTarget {
    /// Empty or missing for the global namespace
    #[serde(default)]
    namespace: String,
    /// Enclosing types as written in source: outermost first, target last
    types: Vec<RawType>,
    bases: Option<Vec<String>>,
    #[serde(default)]
    members: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawType {
    name: String,
    #[serde(default)]
    kind: TypeKind,
    #[serde(default)]
    type_parameters: Vec<String>,
}

impl TargetsConfig {
    /// Parse from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TargetsConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            TargetsConfigError::Io(format!("Failed to read {}: {}", path.as_ref().display(), e))
        })?;
        Self::from_str(&content)
    }

    /// Parse from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, TargetsConfigError> {
        let raw: RawTargetsConfig =
            toml::from_str(content).map_err(|e| TargetsConfigError::Parse(e.to_string()))?;

        let suffix = raw.suffix.unwrap_or_else(|| DEFAULT_SUFFIX.to_string());
        guard::len_in_range("suffix", &suffix, 1, 32).map_err(validation)?;
        for part in suffix.split('.') {
            guard::identifier("suffix", part).map_err(validation)?;
        }

        let targets = raw
            .targets
            .into_iter()
            .enumerate()
            .map(|(index, raw)| Self::build_target(index, raw))
            .collect::<Result<Vec<_>, _>>()?;

        let config = Self {
            suffix,
            format: raw.format,
            targets,
        };
        config.check_hint_overlap()?;

        tracing::debug!(
            targets = config.len(),
            suffix = %config.suffix,
            "parsed targets config"
        );
        Ok(config)
    }

    /// Get all targets, in file order.
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    /// Get target count.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    fn build_target(index: usize, raw: RawTarget) -> Result<Target, TargetsConfigError> {
        let context = |e: &dyn std::fmt::Display| {
            TargetsConfigError::Validation(format!("target[{}]: {}", index, e))
        };

        // Descriptors are innermost first; the file lists types as written.
        let hierarchy = raw
            .types
            .into_iter()
            .rev()
            .map(|ty| ContainingType {
                name: ty.name,
                kind: ty.kind,
                type_parameters: ty.type_parameters,
            })
            .collect();
        let descriptor =
            HierarchyDescriptor::new(raw.namespace, hierarchy).map_err(|e| context(&e))?;

        let bases = raw
            .bases
            .map(|bases| {
                bases
                    .into_iter()
                    .map(BaseRef::new)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()
            .map_err(|e| context(&e))?;

        Ok(Target {
            descriptor,
            bases,
            members: raw.members.into_iter().map(MemberNode::new).collect(),
        })
    }

    /// Two targets must never map to the same output file.
    fn check_hint_overlap(&self) -> Result<(), TargetsConfigError> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        for (index, target) in self.targets.iter().enumerate() {
            let hint = target.descriptor.hint_name(&self.suffix);
            if let Some(first) = seen.insert(hint.clone(), index) {
                return Err(TargetsConfigError::Validation(format!(
                    "target[{}] and target[{}] both generate '{}'",
                    first, index, hint
                )));
            }
        }
        Ok(())
    }
}

fn validation(e: guard::GuardError) -> TargetsConfigError {
    TargetsConfigError::Validation(e.to_string())
}

/// Errors during config parsing.
#[derive(Debug, Error)]
pub enum TargetsConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}
