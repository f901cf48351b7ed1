//! Generate source code from the IFT feature registry.

mod error;

use std::path::{Path, PathBuf};

use feature_registry::{EmitError, OutputFormat, RegistryError};
use serde::Deserialize;
use thiserror::Error;

pub use error::ErrorReport;

/// Errors from turning a registry table into code.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Emit(#[from] EmitError),
}

impl GenerateError {
    /// The registry line responsible for this error, if known.
    pub fn line(&self) -> Option<u64> {
        match self {
            GenerateError::Registry(err) => err.line(),
            GenerateError::Emit(_) => None,
        }
    }
}

/// Compile the registry table in `contents` and render it as `format`.
///
/// `source_name` is recorded in the banner of the generated file.
pub fn generate_code(
    contents: &str,
    source_name: &str,
    format: OutputFormat,
) -> Result<String, GenerateError> {
    let tags = feature_registry::compile_reader(contents.as_bytes())?;
    log::debug!("{source_name}: {} default feature tags", tags.len());
    Ok(format.render(&tags, source_name)?)
}

/// Read the registry table at `path` and render it as `format`.
///
/// Errors tied to a row of the table are reported against that row.
pub fn generate_file(path: &Path, format: OutputFormat) -> Result<String, ErrorReport> {
    let contents = feature_registry::read_table(path)
        .map_err(|e| ErrorReport::message(e.to_string()))?;
    let source_name = path.display().to_string();
    generate_code(&contents, &source_name, format)
        .map_err(|e| ErrorReport::from_error_src(&e, path, contents))
}

/// Write generated code to `path`.
pub fn write_generated(path: &Path, generated: &str) -> Result<(), ErrorReport> {
    log::info!("writing {} bytes to {}", generated.len(), path.display());
    std::fs::write(path, generated).map_err(|e| {
        ErrorReport::message(format!("error writing '{}': {}", path.display(), e))
    })
}

/// Generate code from the table at `source` and write it to `target`.
///
/// `target` is left untouched unless generation succeeds.
pub fn generate_to_file(
    source: &Path,
    target: &Path,
    format: OutputFormat,
) -> Result<(), ErrorReport> {
    let generated = generate_file(source, format)?;
    write_generated(target, &generated)
}

/// A list of files to regenerate, read from a toml file.
#[derive(Debug, Deserialize)]
pub struct CodegenPlan {
    pub generate: Vec<CodegenOp>,
}

#[derive(Debug, Deserialize)]
pub struct CodegenOp {
    pub source: PathBuf,
    pub target: PathBuf,
    /// One of `rust` or `cpp`; defaults to `rust`.
    #[serde(default)]
    pub format: Option<String>,
}

impl CodegenOp {
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        self.format
            .as_deref()
            .map(str::parse::<OutputFormat>)
            .unwrap_or(Ok(OutputFormat::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRY: &str = "Tag,Description,Default\nfrac,Fractions,1\nvrtr,Vertical Alternates,1\n";

    #[test]
    fn parse_plan() {
        let plan: CodegenPlan = toml::from_str(
            r#"
            [[generate]]
            source = "resources/feature_registry/feature-registry.csv"
            target = "feature-tags/generated/generated_default_features.rs"

            [[generate]]
            source = "resources/feature_registry/feature-registry.csv"
            target = "out/feature_registry.h"
            format = "cpp"
            "#,
        )
        .unwrap();
        assert_eq!(plan.generate.len(), 2);
        assert_eq!(plan.generate[0].output_format(), Ok(OutputFormat::Rust));
        assert_eq!(plan.generate[1].output_format(), Ok(OutputFormat::Cpp));
        assert_eq!(
            plan.generate[1].target,
            PathBuf::from("out/feature_registry.h")
        );
    }

    #[test]
    fn bad_plan_format() {
        let plan: CodegenPlan = toml::from_str(
            r#"
            [[generate]]
            source = "a.csv"
            target = "a.java"
            format = "java"
            "#,
        )
        .unwrap();
        assert!(plan.generate[0].output_format().is_err());
    }

    #[test]
    fn generate_rust() {
        let code = generate_code(
            "Tag,Description,Default\nfrac,Fractions,1\ncv01-cv99,Character Variants,0\n",
            "test.csv",
            OutputFormat::Rust,
        )
        .unwrap();
        assert!(code.contains("// Generated by feature-codegen from test.csv"));
        assert!(code.contains("    Tag::new(b\"frac\"),\n];"));
        assert!(!code.contains("cv01"));
    }

    #[test]
    fn errors_carry_lines() {
        let err = generate_code(
            "frac,Fractions,1\nzero,Slashed Zero,no\n",
            "test.csv",
            OutputFormat::Rust,
        )
        .unwrap_err();
        assert_eq!(err.line(), Some(2));

        let err =
            generate_code("ss01-cv03,Mismatched,1\n", "test.csv", OutputFormat::Rust).unwrap_err();
        assert!(matches!(err, GenerateError::Emit(_)));
        assert_eq!(err.line(), None);
    }

    #[test]
    fn generate_to_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("registry.csv");
        let target = dir.path().join("generated.rs");
        std::fs::write(&source, REGISTRY).unwrap();

        generate_to_file(&source, &target, OutputFormat::Rust).unwrap();
        let generated = std::fs::read_to_string(&target).unwrap();
        assert!(generated.contains("    Tag::new(b\"frac\"),\n    Tag::new(b\"vrtr\"),\n];"));
    }

    #[test]
    fn failed_generation_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("registry.csv");
        let target = dir.path().join("generated.rs");
        std::fs::write(&source, "frac,Fractions,1\nabcd,desc,x\n").unwrap();

        let err = generate_to_file(&source, &target, OutputFormat::Rust).unwrap_err();
        assert_eq!(err.location().map(|loc| loc.offset()), Some(17));
        assert!(!target.exists());

        // an existing target keeps its previous contents
        std::fs::write(&target, "previous").unwrap();
        assert!(generate_to_file(&source, &target, OutputFormat::Cpp).is_err());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "previous");
    }

    #[test]
    fn unreadable_table_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("missing.csv");
        let target = dir.path().join("generated.rs");

        let err = generate_to_file(&source, &target, OutputFormat::Rust).unwrap_err();
        assert!(err.location().is_none());
        assert!(
            err.to_string().starts_with("Unable to read feature registry"),
            "{err}"
        );
        assert!(!target.exists());
    }
}
