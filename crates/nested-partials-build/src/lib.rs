//! Build-time utilities for nested-partials.
//!
//! This crate provides tools for:
//! - Parsing `targets.toml` configuration files
//! - Synthesizing every configured target in parallel
//! - Writing one generated source per target, keyed by its hint name
//!
//! # Usage in build.rs
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     println!("cargo:rerun-if-changed=targets.toml");
//!     nested_partials_build::generate("targets.toml", "generated")
//!         .expect("Failed to generate partial declarations");
//! }
//! ```
//!
//! # Config format
//!
//! ```toml
//! suffix = "g"            # App.Models.Outer.Inner.g.cs
//!
//! [format]
//! indent_width = 4
//! line_ending = "lf"      # or "crlf"
//!
//! [[target]]
//! namespace = "App.Models"
//! # As written in source: outermost first, the target type last.
//! types = [
//!     { name = "Outer", type_parameters = ["T"] },
//!     { name = "Inner", kind = "struct" },
//! ]
//! bases = ["IEquatable<Inner>"]
//! members = [
//!     "public bool Equals(Inner other) => true;",
//! ]
//! ```
//!
//! Files whose contents did not change are left untouched so their
//! modification times stay stable across builds.

mod toml_parser;

pub use toml_parser::{DEFAULT_SUFFIX, Target, TargetsConfig, TargetsConfigError};

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;

/// A rendered source file, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    /// File name, e.g. `App.Models.Outer.Inner.g.cs`
    pub hint_name: String,
    pub text: String,
}

/// Synthesize and render every target of `config`.
///
/// Targets are processed on rayon's pool; the result keeps config order.
pub fn synthesize_all(config: &TargetsConfig) -> Vec<GeneratedSource> {
    let targets: Vec<&Target> = config.targets().collect();
    targets
        .par_iter()
        .map(|target| {
            let root = target
                .descriptor
                .synthesize(target.members.clone(), target.bases.clone());
            GeneratedSource {
                hint_name: target.descriptor.hint_name(&config.suffix),
                text: root.render(&config.format),
            }
        })
        .collect()
}

/// Main entry point for build.rs integration.
///
/// Reads `targets.toml`, synthesizes every target, and writes the results
/// into `output_dir` (created if missing). Returns the path of every
/// generated file in config order, whether it was rewritten or unchanged.
///
/// # Errors
///
/// Returns an error if:
/// - `targets.toml` cannot be read, parsed, or validated
/// - the output directory or a file in it cannot be written
pub fn generate(
    config_path: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, GenerateError> {
    let config = TargetsConfig::from_file(config_path.as_ref())?;
    generate_from_config(&config, output_dir)
}

/// Generate from an already parsed config.
pub fn generate_from_config(
    config: &TargetsConfig,
    output_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, GenerateError> {
    let output_dir = output_dir.as_ref();

    // 1. Synthesize (parallel, no I/O)
    let sources = synthesize_all(config);

    // 2. Ensure output directory
    std::fs::create_dir_all(output_dir).map_err(|source| GenerateError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    // 3. Write changed files
    let mut written = 0usize;
    let mut paths = Vec::with_capacity(sources.len());
    for source in sources {
        let path = output_dir.join(&source.hint_name);
        if write_if_changed(&path, &source.text)? {
            written += 1;
            tracing::info!(path = %path.display(), "wrote generated source");
        } else {
            tracing::debug!(path = %path.display(), "generated source unchanged");
        }
        paths.push(path);
    }

    tracing::info!(
        total = paths.len(),
        written,
        output_dir = %output_dir.display(),
        "generation finished"
    );
    Ok(paths)
}

/// Returns `true` if the file was (re)written.
fn write_if_changed(path: &Path, text: &str) -> Result<bool, GenerateError> {
    match std::fs::read(path) {
        Ok(existing) if existing == text.as_bytes() => return Ok(false),
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(GenerateError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    }
    std::fs::write(path, text).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}

/// Errors that can occur during generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Config error: {0}")]
    Config(#[from] TargetsConfigError),
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
