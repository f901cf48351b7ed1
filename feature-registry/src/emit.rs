//! Rendering compiled tags as source code.
//!
//! Every tag is validated before anything is rendered, so an invalid registry
//! never produces a partial declaration.

use std::{
    fmt::{Display, Write},
    str::FromStr,
};

use font_types::Tag;

use crate::{ConcreteTag, EmitError};

const REGISTRY_URL: &str = "https://w3c.github.io/IFT/Overview.html#feature-tag-list";

/// The language of the generated declaration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// A `&[Tag]` static, for use with `font-types`.
    #[default]
    Rust,
    /// A C++ header declaring `ift::feature_registry::DefaultFeatureTags()`.
    Cpp,
}

impl OutputFormat {
    /// Render `tags` in this format.
    ///
    /// `source` names the registry table the tags were compiled from, and is
    /// mentioned in the generated file's banner.
    pub fn render(self, tags: &[ConcreteTag], source: &str) -> Result<String, EmitError> {
        let tags = tags.iter().map(checked_tag).collect::<Result<Vec<_>, _>>()?;
        let mut out = String::new();
        match self {
            OutputFormat::Rust => write_rust(&mut out, &tags, source)?,
            OutputFormat::Cpp => write_cpp(&mut out, &tags, source)?,
        }
        Ok(out)
    }
}

/// Ensure a tag can be written as a four byte literal.
fn checked_tag(tag: &ConcreteTag) -> Result<Tag, EmitError> {
    let bytes = tag.as_bytes();
    if bytes.len() != 4 {
        return Err(EmitError::TagLength {
            tag: tag.to_string(),
            len: bytes.len(),
        });
    }
    Tag::new_checked(bytes).map_err(|source| EmitError::InvalidTag {
        tag: tag.to_string(),
        source,
    })
}

fn write_rust(out: &mut String, tags: &[Tag], source: &str) -> std::fmt::Result {
    writeln!(out, "// THIS FILE IS AUTOGENERATED.")?;
    writeln!(out, "// Any changes to this file will be overwritten.")?;
    writeln!(out, "// Generated by feature-codegen from {source}")?;
    writeln!(out)?;
    writeln!(
        out,
        "/// Feature tags which are always included in the initial subset of an IFT font."
    )?;
    writeln!(out, "///")?;
    writeln!(out, "/// See <{REGISTRY_URL}>")?;
    writeln!(out, "pub static DEFAULT_FEATURE_TAGS: &[Tag] = &[")?;
    for tag in tags {
        write!(out, "    Tag::new(b\"")?;
        for byte in tag.to_be_bytes() {
            match byte {
                b'"' | b'\\' => write!(out, "\\{}", byte as char)?,
                _ => out.push(byte as char),
            }
        }
        writeln!(out, "\"),")?;
    }
    writeln!(out, "];")
}

fn write_cpp(out: &mut String, tags: &[Tag], source: &str) -> std::fmt::Result {
    const GUARD: &str = "IFT_FEATURE_REGISTRY_FEATURE_REGISTRY_H_";
    const SET: &str = "absl::flat_hash_set<hb_tag_t>";

    writeln!(out, "// THIS FILE IS AUTOGENERATED.")?;
    writeln!(out, "// Generated by feature-codegen from {source}")?;
    writeln!(out, "#ifndef {GUARD}")?;
    writeln!(out, "#define {GUARD}")?;
    writeln!(out)?;
    writeln!(out, "#include \"hb.h\"")?;
    writeln!(out, "#include \"absl/base/no_destructor.h\"")?;
    writeln!(out, "#include \"absl/container/flat_hash_set.h\"")?;
    writeln!(out)?;
    writeln!(out, "namespace ift::feature_registry {{")?;
    writeln!(out)?;
    writeln!(out, "// See {REGISTRY_URL}")?;
    writeln!(out, "static const {SET}& DefaultFeatureTags() {{")?;
    writeln!(
        out,
        "  static const absl::NoDestructor<{SET}> kDefaultFeatures(({SET}) {{"
    )?;
    for tag in tags {
        let [a, b, c, d] = tag.to_be_bytes().map(CppChar);
        writeln!(out, "    HB_TAG({a}, {b}, {c}, {d}),")?;
    }
    writeln!(out, "  }});")?;
    writeln!(out, "  return *kDefaultFeatures;")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "}}  // namespace ift::feature_registry")?;
    writeln!(out, "#endif  // {GUARD}")
}

/// A C++ character literal.
struct CppChar(u8);

impl Display for CppChar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            b'\'' | b'\\' => write!(f, "'\\{}'", self.0 as char),
            byte => write!(f, "'{}'", byte as char),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rust" | "rs" => Ok(OutputFormat::Rust),
            "cpp" | "cc" | "c++" => Ok(OutputFormat::Cpp),
            other => Err(format!(
                "unknown output format '{other}', expected 'rust' or 'cpp'"
            )),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Rust => f.write_str("rust"),
            OutputFormat::Cpp => f.write_str("cpp"),
        }
    }
}
