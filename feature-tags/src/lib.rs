//! Default feature tags for incremental font transfer.
//!
//! These are the features an IFT encoder always keeps in the initial font
//! subset, as listed in the feature tag registry:
//! <https://w3c.github.io/IFT/Overview.html#feature-tag-list>
//!
//! The list is generated from `resources/feature_registry/feature-registry.csv`
//! by the `codegen` binary; run `cargo run --bin codegen resources/codegen_plan.toml`
//! from the workspace root after editing the registry.

#![forbid(unsafe_code)]

use std::{collections::BTreeSet, sync::OnceLock};

pub use font_types::Tag;

include!("../generated/generated_default_features.rs");

/// The default feature tags as a set.
pub fn default_feature_tags() -> &'static BTreeSet<Tag> {
    static DEFAULT_FEATURES: OnceLock<BTreeSet<Tag>> = OnceLock::new();
    DEFAULT_FEATURES.get_or_init(|| DEFAULT_FEATURE_TAGS.iter().copied().collect())
}

/// Returns `true` if `tag` is always included in the initial subset.
pub fn is_default_feature(tag: Tag) -> bool {
    default_feature_tags().contains(&tag)
}
