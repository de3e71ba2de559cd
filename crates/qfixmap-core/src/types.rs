//! Shared record shapes exchanged between the resolution pipeline, the merge
//! engine, and the delivery surfaces.

use serde::{Deserialize, Serialize};

/// One product row, from either the scraped catalog or an uploaded protocol
/// file. Both provenances share this shape; which fields are authoritative
/// depends on the source (see [`MergedProductRecord`]).
///
/// Protocol rows typically carry only `identity_key`, `name`, `description`
/// (alternate language), `care_text`, and `country_of_origin`; the remaining
/// fields default to empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Article or product number.
    pub identity_key: String,
    pub name: String,
    #[serde(default)]
    pub clothing_type: String,
    #[serde(default)]
    pub material_composition: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub care_text: Option<String>,
    #[serde(default)]
    pub country_of_origin: Option<String>,
    #[serde(default)]
    pub gender_category: String,
}

/// One raw catalog row as handed over by a scraper collaborator, carrying the
/// brand it came from. Input shape for batch resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRow {
    pub identity_key: String,
    pub name: String,
    /// Breadcrumb string, segments separated by `>`.
    #[serde(default)]
    pub clothing_type: String,
    #[serde(default)]
    pub material_composition: String,
    #[serde(default)]
    pub gender_category: String,
    pub brand: String,
}

/// Provenance tag on a merged record: did a protocol row contribute, or is
/// this the scraper row alone?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStatus {
    Merged,
    ScraperOnly,
}

impl std::fmt::Display for MergeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeStatus::Merged => write!(f, "merged"),
            MergeStatus::ScraperOnly => write!(f, "scraper_only"),
        }
    }
}

/// One row of the merged product view. Scraper fields win for name, clothing
/// type, composition, and the native-language description; protocol fields
/// win for care text, country of origin, and the alternate-language
/// description. Built on demand, never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedProductRecord {
    pub identity_key: String,
    /// Identity key of the matched protocol row, when one matched.
    pub protocol_identity_key: Option<String>,
    pub name: String,
    pub clothing_type: String,
    pub material_composition: String,
    pub description: String,
    pub alternate_description: Option<String>,
    pub care_text: Option<String>,
    pub country_of_origin: Option<String>,
    pub gender_category: String,
    pub merge_status: MergeStatus,
}

/// Resolution output for one product: target taxonomy names and IDs plus the
/// booking URL. Every field except `qfix_url` is absent when its lookup
/// failed; `qfix_url` always holds at least the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMapping {
    pub qfix_clothing_type: Option<String>,
    pub qfix_clothing_type_id: Option<i64>,
    pub qfix_material: Option<String>,
    pub qfix_material_id: Option<i64>,
    pub qfix_subcategory: Option<String>,
    pub qfix_subcategory_id: Option<i64>,
    pub qfix_url: String,
}

/// A recorded gap between source vocabulary and the target taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmappedEntry {
    /// First-seen raw form of the value that failed to resolve.
    pub raw_value: String,
    pub source_brand: String,
    pub occurrence_count: u64,
}
