//! Merge engine for `qfixmap`.
//!
//! Reconciles a scraped product catalog with rows from an uploaded protocol
//! file. Matching is exact normalized-name equality — the same normalizer the
//! resolver uses — with no fuzzy matching: a missed pair is preferable to a
//! wrong one. The merged view is scraper-driven: every scraper record yields
//! exactly one output row (in input order), protocol-only rows are dropped.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use qfixmap_core::normalize::normalize_text;
use qfixmap_core::{MergeStatus, MergedProductRecord, ProductRecord};

/// Merges scraper records with protocol records by normalized name.
///
/// Scraper fields win for `name`, `clothing_type`, `material_composition`,
/// and the native-language `description`; the matched protocol row supplies
/// `care_text`, `country_of_origin`, and the alternate-language description.
/// When several protocol rows share one normalized name (size variants
/// imported as separate rows), the lowest identity key wins so repeated
/// merges agree.
#[must_use]
pub fn merge(
    scraper_records: &[ProductRecord],
    protocol_records: &[ProductRecord],
) -> Vec<MergedProductRecord> {
    let index = index_protocol(protocol_records);
    let merged: Vec<MergedProductRecord> = scraper_records
        .iter()
        .map(|record| merge_one(record, &index))
        .collect();

    let matched = merged
        .iter()
        .filter(|record| record.merge_status == MergeStatus::Merged)
        .count();
    tracing::debug!(
        scraper = scraper_records.len(),
        protocol = protocol_records.len(),
        matched,
        "merged product records"
    );
    merged
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn index_protocol(protocol_records: &[ProductRecord]) -> HashMap<String, &ProductRecord> {
    let mut index: HashMap<String, &ProductRecord> =
        HashMap::with_capacity(protocol_records.len());
    for record in protocol_records {
        let key = normalize_text(&record.name);
        if key.is_empty() {
            continue;
        }
        match index.entry(key) {
            Entry::Occupied(mut slot) => {
                if record.identity_key < slot.get().identity_key {
                    slot.insert(record);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
        }
    }
    index
}

fn merge_one(
    scraper: &ProductRecord,
    index: &HashMap<String, &ProductRecord>,
) -> MergedProductRecord {
    let Some(protocol) = index.get(&normalize_text(&scraper.name)) else {
        return MergedProductRecord {
            identity_key: scraper.identity_key.clone(),
            protocol_identity_key: None,
            name: scraper.name.clone(),
            clothing_type: scraper.clothing_type.clone(),
            material_composition: scraper.material_composition.clone(),
            description: scraper.description.clone(),
            alternate_description: None,
            care_text: None,
            country_of_origin: None,
            gender_category: scraper.gender_category.clone(),
            merge_status: MergeStatus::ScraperOnly,
        };
    };

    MergedProductRecord {
        identity_key: scraper.identity_key.clone(),
        protocol_identity_key: Some(protocol.identity_key.clone()),
        name: scraper.name.clone(),
        clothing_type: scraper.clothing_type.clone(),
        material_composition: scraper.material_composition.clone(),
        description: scraper.description.clone(),
        alternate_description: non_empty(&protocol.description),
        care_text: protocol.care_text.clone(),
        country_of_origin: protocol.country_of_origin.clone(),
        gender_category: scraper.gender_category.clone(),
        merge_status: MergeStatus::Merged,
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
