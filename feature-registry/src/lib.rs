//! Compiler for the IFT feature tag registry.
//!
//! The registry (<https://w3c.github.io/IFT/Overview.html#feature-tag-list>)
//! is a comma separated table listing feature tags, and whether each tag is
//! part of the set of features that are always included in an initial font
//! subset. Numbered tag families such as `ss01` through `ss20` are listed as a
//! single range row.
//!
//! This crate turns that table into the ordered list of default feature tags,
//! and renders the list as source code for embedding in other programs:
//!
//! - [`row`] classifies a single registry row and expands range rows.
//! - [`registry`] reads the table and drives the classifier over every row.
//! - [`emit`] renders the compiled tags as a Rust or C++ declaration.

#![forbid(unsafe_code)]

mod error;

pub mod emit;
pub mod registry;
pub mod row;

pub use emit::OutputFormat;
pub use error::{EmitError, RegistryError};
pub use registry::{compile, compile_path, compile_reader, read_rows, read_table};
pub use row::{classify_and_expand, ConcreteTag, ExpandedTags, RegistryRow, RowForm};
