//! The resolution pipeline: raw catalog attributes in, resolved taxonomy
//! identifiers out.
//!
//! Resolution is a total function over its input domain — unresolvable
//! clothing types and materials are recorded in the [`UnmappedTracker`] and
//! surface as absent fields, never as errors. Gender tokens go through the
//! per-brand vocabulary; leading breadcrumb segments that are gender tokens
//! carry no clothing-type information and are skipped (and double as a
//! gender hint when the row has no usable gender token of its own).

use std::sync::Arc;

use qfixmap_core::gender::{Gender, GenderVocabulary};
use qfixmap_core::normalize::{parse_composition, split_breadcrumb};
use qfixmap_core::{AppConfig, CatalogRow, ConfigError, ResolvedMapping};

use crate::table::{MappingTable, SubcategoryRule};
use crate::taxonomy;
use crate::unmapped::UnmappedTracker;
use crate::url::QfixUrl;

pub struct Resolver {
    table: Arc<MappingTable>,
    unmapped: Arc<UnmappedTracker>,
    vocab: GenderVocabulary,
    base_url: String,
    default_gender: Option<Gender>,
}

impl Resolver {
    #[must_use]
    pub fn new(
        table: Arc<MappingTable>,
        unmapped: Arc<UnmappedTracker>,
        vocab: GenderVocabulary,
        base_url: impl Into<String>,
        default_gender: Option<Gender>,
    ) -> Self {
        Self {
            table,
            unmapped,
            vocab,
            base_url: base_url.into(),
            default_gender,
        }
    }

    /// Seeded resolver wired from the application configuration: default
    /// rule tables, built-in gender vocabulary plus the configured overlay.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the configured vocabulary file cannot be
    /// loaded.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let vocab = match &config.gender_vocab_path {
            Some(path) => {
                let file = qfixmap_core::gender::load_gender_vocab(path)?;
                GenderVocabulary::with_overlay(&file)
            }
            None => GenderVocabulary::builtin(),
        };
        Ok(Self::new(
            Arc::new(MappingTable::seeded()),
            Arc::new(UnmappedTracker::new()),
            vocab,
            config.base_url.clone(),
            config.default_gender,
        ))
    }

    /// Resolves one set of raw catalog attributes into target identifiers.
    ///
    /// Never fails: a missed lookup is recorded against `brand` and the
    /// corresponding output fields stay absent. The returned `qfix_url` is
    /// always constructible and degrades to the bare base URL.
    #[must_use]
    pub fn resolve(
        &self,
        clothing_type: &str,
        material_composition: &str,
        gender_category: &str,
        brand: &str,
    ) -> ResolvedMapping {
        let segments = split_breadcrumb(clothing_type);
        let (lookup_segments, crumb_gender) = self.strip_gender_segments(brand, &segments);

        let clothing_rule = self.table.lookup_clothing_type(lookup_segments);
        if clothing_rule.is_none() && !lookup_segments.is_empty() {
            self.unmapped.record(clothing_type.trim(), brand);
        }

        let pairs = parse_composition(material_composition);
        let material_rule = pairs
            .first()
            .and_then(|(_, dominant)| self.table.lookup_material(dominant));
        if material_rule.is_none() {
            if let Some((_, dominant)) = pairs.first() {
                self.unmapped.record(dominant, brand);
            } else if !material_composition.trim().is_empty() {
                self.unmapped.record(material_composition.trim(), brand);
            }
        }

        let hint = self
            .vocab
            .resolve_token(brand, gender_category)
            .or(crumb_gender);
        let selection = match hint {
            Some(Gender::Unisex) | None => self.default_gender,
            Some(gender) => Some(gender),
        };

        let mut resolved = ResolvedMapping {
            qfix_clothing_type: None,
            qfix_clothing_type_id: None,
            qfix_material: None,
            qfix_material_id: None,
            qfix_subcategory: None,
            qfix_subcategory_id: None,
            qfix_url: String::new(),
        };

        if let Some(rule) = &clothing_rule {
            resolved.qfix_clothing_type = Some(rule.target_category.clone());
            resolved.qfix_clothing_type_id = rule.target_category_id;
            match &rule.subcategory {
                Some(SubcategoryRule::Fixed { name, id }) => {
                    resolved.qfix_subcategory = Some(name.clone());
                    resolved.qfix_subcategory_id = *id;
                }
                Some(SubcategoryRule::PerGender(ids)) => {
                    if let Some(gender) = selection {
                        if let Some(id) = ids.get(&gender) {
                            resolved.qfix_subcategory_id = Some(*id);
                            resolved.qfix_subcategory = taxonomy::subcategory_name_by_id(*id)
                                .or_else(|| taxonomy::gendered_subcategory_label(gender))
                                .map(ToString::to_string);
                        }
                    }
                }
                None => {}
            }
        }

        if let Some(rule) = &material_rule {
            resolved.qfix_material = Some(rule.target_material.clone());
            resolved.qfix_material_id = rule.target_material_id;
        }

        resolved.qfix_url = QfixUrl::new(&self.base_url)
            .category_id(resolved.qfix_clothing_type_id)
            .material_id(resolved.qfix_material_id)
            .build();

        resolved
    }

    /// Resolves one catalog row.
    #[must_use]
    pub fn resolve_row(&self, row: &CatalogRow) -> ResolvedMapping {
        self.resolve(
            &row.clothing_type,
            &row.material_composition,
            &row.gender_category,
            &row.brand,
        )
    }

    #[must_use]
    pub fn table(&self) -> &Arc<MappingTable> {
        &self.table
    }

    #[must_use]
    pub fn unmapped(&self) -> &Arc<UnmappedTracker> {
        &self.unmapped
    }

    /// Skips leading breadcrumb segments that are gender tokens for this
    /// brand, remembering the first one as a gender hint.
    fn strip_gender_segments<'s>(
        &self,
        brand: &str,
        segments: &'s [String],
    ) -> (&'s [String], Option<Gender>) {
        let mut start = 0;
        let mut crumb_gender = None;
        while start < segments.len() {
            match self.vocab.resolve_token(brand, &segments[start]) {
                Some(gender) => {
                    if crumb_gender.is_none() {
                        crumb_gender = Some(gender);
                    }
                    start += 1;
                }
                None => break,
            }
        }
        (&segments[start..], crumb_gender)
    }
}
