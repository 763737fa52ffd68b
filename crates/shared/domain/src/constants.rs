//! Shared string constants: `OpenAPI` tags and table names.

pub const SYSTEM_TAG: &str = "System";
pub const CATALOG_TAG: &str = "Catalog";
pub const MATCHING_TAG: &str = "Matching";

pub const MATERIAL: &str = "material";
pub const CRAFT: &str = "craft";
