//! The runtime-mutable mapping store.
//!
//! Holds clothing-type rules (keyed by normalized breadcrumb path), keyword
//! fallback rules, and material rules (keyed by normalized term), seeded from
//! [`crate::taxonomy`] and extensible at runtime through validated, append-only
//! additions. Additions are immediately visible to subsequent lookups in the
//! same process, are never propagated to other process instances, and are lost
//! on restart: this store is a single-instance cache, not a system of record.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use qfixmap_core::gender::Gender;
use qfixmap_core::normalize::{normalize_text, split_breadcrumb};

use crate::error::MappingError;
use crate::taxonomy::{self, SeedSubcategory};

/// Which of the two mapping tables a mutation addresses. Parsed and
/// validated at the boundary; anything else is rejected there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingKind {
    ClothingType,
    Material,
}

impl std::fmt::Display for MappingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingKind::ClothingType => write!(f, "clothing_type"),
            MappingKind::Material => write!(f, "material"),
        }
    }
}

impl FromStr for MappingKind {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clothing_type" => Ok(MappingKind::ClothingType),
            "material" => Ok(MappingKind::Material),
            other => Err(MappingError::UnknownKind {
                given: other.to_string(),
            }),
        }
    }
}

/// Subcategory wiring of a clothing-type rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubcategoryRule {
    /// Same subcategory regardless of gender (Outerwear, Accessories, ...).
    Fixed { name: String, id: Option<i64> },
    /// Gendered clothing subcategories, selected by the resolved gender.
    PerGender(BTreeMap<Gender, i64>),
}

/// One clothing-type rule. `source_path` segments are normalized at insertion
/// time; the lookup key is the path joined by `>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingTypeRule {
    pub source_path: Vec<String>,
    pub target_category: String,
    pub target_category_id: Option<i64>,
    pub subcategory: Option<SubcategoryRule>,
}

/// A keyword fallback rule, matched by substring against the joined
/// normalized breadcrumb when no path rule applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    pub target_category: String,
    pub target_category_id: Option<i64>,
    pub subcategory: Option<SubcategoryRule>,
}

impl KeywordRule {
    fn to_clothing_rule(&self) -> ClothingTypeRule {
        ClothingTypeRule {
            source_path: vec![self.keyword.clone()],
            target_category: self.target_category.clone(),
            target_category_id: self.target_category_id,
            subcategory: self.subcategory.clone(),
        }
    }
}

/// One material rule. `source_term` is normalized at insertion time; lookup
/// is an exact normalized-term match, never hierarchical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRule {
    pub source_term: String,
    pub target_material: String,
    pub target_material_id: Option<i64>,
}

/// A successfully stored mutation, echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AddedMapping {
    ClothingType(ClothingTypeRule),
    Keyword(KeywordRule),
    Material(MaterialRule),
}

/// Point-in-time copy of the table contents, sorted for stable output.
#[derive(Debug, Clone, Serialize)]
pub struct TableSnapshot {
    pub clothing_types: Vec<ClothingTypeRule>,
    pub keywords: Vec<KeywordRule>,
    pub materials: Vec<MaterialRule>,
}

#[derive(Debug, Default)]
struct TableInner {
    clothing_types: HashMap<String, ClothingTypeRule>,
    keywords: Vec<KeywordRule>,
    materials: HashMap<String, MaterialRule>,
}

/// The mapping store. Concurrent readers with a low write rate; a reader
/// never observes a partially-applied addition.
#[derive(Debug, Default)]
pub struct MappingTable {
    inner: RwLock<TableInner>,
}

impl MappingTable {
    /// An empty table with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A table seeded with the static default rules from [`crate::taxonomy`].
    #[must_use]
    pub fn seeded() -> Self {
        let table = Self::new();
        let (clothing_rules, keyword_rules, material_rules) = {
            let mut inner = table.write();

            for (source, target, sub) in taxonomy::CLOTHING_TYPE_SEEDS {
                let segments = split_breadcrumb(source);
                let key = segments.join(">");
                let rule = ClothingTypeRule {
                    source_path: segments,
                    target_category: (*target).to_string(),
                    target_category_id: taxonomy::clothing_type_id(target),
                    subcategory: Some(seed_subcategory(*sub)),
                };
                inner.clothing_types.insert(key, rule);
            }

            for (keyword, target) in taxonomy::KEYWORD_SEEDS {
                inner.keywords.push(KeywordRule {
                    keyword: normalize_text(keyword),
                    target_category: (*target).to_string(),
                    target_category_id: taxonomy::clothing_type_id(target),
                    subcategory: Some(default_subcategory(target)),
                });
            }

            for (term, target) in taxonomy::MATERIAL_SEEDS {
                let key = normalize_text(term);
                let rule = MaterialRule {
                    source_term: key.clone(),
                    target_material: (*target).to_string(),
                    target_material_id: taxonomy::material_id(target),
                };
                inner.materials.insert(key, rule);
            }

            (
                inner.clothing_types.len(),
                inner.keywords.len(),
                inner.materials.len(),
            )
        };

        tracing::info!(clothing_rules, keyword_rules, material_rules, "mapping table seeded");
        table
    }

    /// Hierarchical longest-prefix-first clothing-type lookup.
    ///
    /// Tries the full `N`-segment path, then the `N-1` most-general
    /// (leftmost) segments, and so on. When every prefix misses, keyword
    /// rules are scanned against the joined breadcrumb. Segments must
    /// already be normalized ([`split_breadcrumb`] output).
    #[must_use]
    pub fn lookup_clothing_type(&self, segments: &[String]) -> Option<ClothingTypeRule> {
        if segments.is_empty() {
            return None;
        }
        let inner = self.read();

        for end in (1..=segments.len()).rev() {
            let key = segments[..end].join(">");
            if let Some(rule) = inner.clothing_types.get(&key) {
                return Some(rule.clone());
            }
        }

        let joined = segments.join(" > ");
        inner
            .keywords
            .iter()
            .find(|rule| joined.contains(&rule.keyword))
            .map(KeywordRule::to_clothing_rule)
    }

    /// Exact normalized-term material lookup. The term may arrive in any
    /// casing; it is normalized here.
    #[must_use]
    pub fn lookup_material(&self, term: &str) -> Option<MaterialRule> {
        let key = normalize_text(term);
        self.read().materials.get(&key).cloned()
    }

    /// Dispatches a validated mutation to the addressed table.
    ///
    /// # Errors
    ///
    /// Returns `MappingError` when `from` is empty after normalization or
    /// `to` is not a known target name for the kind.
    pub fn add_mapping(
        &self,
        kind: MappingKind,
        from: &str,
        to: &str,
    ) -> Result<AddedMapping, MappingError> {
        match kind {
            MappingKind::ClothingType => self.add_clothing_type_mapping(from, to),
            MappingKind::Material => self.add_material_mapping(from, to),
        }
    }

    /// Adds a clothing-type rule. A `~`-prefixed `from` adds a keyword rule;
    /// anything else adds a breadcrumb path rule. `to` must be a canonical
    /// clothing-type name. Replaces an existing rule for the same source.
    ///
    /// # Errors
    ///
    /// Returns `MappingError` on an empty source or an unknown target.
    pub fn add_clothing_type_mapping(
        &self,
        from: &str,
        to: &str,
    ) -> Result<AddedMapping, MappingError> {
        let target = to.trim();
        if target.is_empty() {
            return Err(MappingError::EmptyTarget);
        }
        let Some(target_id) = taxonomy::clothing_type_id(target) else {
            return Err(MappingError::UnknownTarget {
                kind: MappingKind::ClothingType,
                given: target.to_string(),
                valid: owned(&taxonomy::clothing_type_names()),
            });
        };

        if let Some(raw_keyword) = from.trim().strip_prefix('~') {
            let keyword = normalize_text(raw_keyword);
            if keyword.is_empty() {
                return Err(MappingError::EmptySource);
            }
            let rule = KeywordRule {
                keyword: keyword.clone(),
                target_category: target.to_string(),
                target_category_id: Some(target_id),
                subcategory: Some(default_subcategory(target)),
            };
            {
                let mut inner = self.write();
                if let Some(existing) = inner.keywords.iter_mut().find(|k| k.keyword == keyword) {
                    *existing = rule.clone();
                } else {
                    inner.keywords.push(rule.clone());
                }
            }
            tracing::info!(keyword = %keyword, target = %target, "keyword mapping added");
            return Ok(AddedMapping::Keyword(rule));
        }

        let segments = split_breadcrumb(from);
        if segments.is_empty() {
            return Err(MappingError::EmptySource);
        }
        let key = segments.join(">");
        let rule = ClothingTypeRule {
            source_path: segments,
            target_category: target.to_string(),
            target_category_id: Some(target_id),
            subcategory: Some(default_subcategory(target)),
        };
        self.write().clothing_types.insert(key.clone(), rule.clone());
        tracing::info!(path = %key, target = %target, "clothing-type mapping added");
        Ok(AddedMapping::ClothingType(rule))
    }

    /// Adds a material rule. `to` must be a canonical material name.
    /// Replaces an existing rule for the same term.
    ///
    /// # Errors
    ///
    /// Returns `MappingError` on an empty source or an unknown target.
    pub fn add_material_mapping(&self, from: &str, to: &str) -> Result<AddedMapping, MappingError> {
        let target = to.trim();
        if target.is_empty() {
            return Err(MappingError::EmptyTarget);
        }
        let Some(target_id) = taxonomy::material_id(target) else {
            return Err(MappingError::UnknownTarget {
                kind: MappingKind::Material,
                given: target.to_string(),
                valid: owned(&taxonomy::material_names()),
            });
        };

        let term = normalize_text(from);
        if term.is_empty() {
            return Err(MappingError::EmptySource);
        }
        let rule = MaterialRule {
            source_term: term.clone(),
            target_material: target.to_string(),
            target_material_id: Some(target_id),
        };
        self.write().materials.insert(term.clone(), rule.clone());
        tracing::info!(term = %term, target = %target, "material mapping added");
        Ok(AddedMapping::Material(rule))
    }

    /// Sorted copy of the current contents (seeded plus added rules).
    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        let inner = self.read();

        let mut clothing_types: Vec<ClothingTypeRule> =
            inner.clothing_types.values().cloned().collect();
        clothing_types.sort_by(|a, b| a.source_path.cmp(&b.source_path));

        let mut keywords = inner.keywords.clone();
        keywords.sort_by(|a, b| a.keyword.cmp(&b.keyword));

        let mut materials: Vec<MaterialRule> = inner.materials.values().cloned().collect();
        materials.sort_by(|a, b| a.source_term.cmp(&b.source_term));

        TableSnapshot {
            clothing_types,
            keywords,
            materials,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, TableInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TableInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn seed_subcategory(sub: SeedSubcategory) -> SubcategoryRule {
    match sub {
        SeedSubcategory::Gendered => SubcategoryRule::PerGender(taxonomy::gendered_subcategory_ids()),
        SeedSubcategory::Fixed(name) => SubcategoryRule::Fixed {
            name: name.to_string(),
            id: taxonomy::subcategory_id(name),
        },
    }
}

/// Subcategory wiring for runtime-added rules, derived from the target the
/// way the seed tables wire the same targets.
fn default_subcategory(target: &str) -> SubcategoryRule {
    const OUTERWEAR: &[&str] = &["Jacket", "Unlined Jacket / Vest", "Lined Jacket / Vest", "Coat"];
    const SWIMWEAR: &[&str] = &["Swimsuit", "Bikini", "Swimming trunks"];
    const ACCESSORIES: &[&str] = &["Hat", "Cap", "Gloves", "Scarf / Shawl", "Belt", "Handbags"];

    let fixed = |name: &str| SubcategoryRule::Fixed {
        name: name.to_string(),
        id: taxonomy::subcategory_id(name),
    };

    if OUTERWEAR.contains(&target) {
        fixed("Outerwear")
    } else if SWIMWEAR.contains(&target) {
        fixed("Swimwear / Wet suits")
    } else if ACCESSORIES.contains(&target) {
        fixed("Accessories")
    } else {
        SubcategoryRule::PerGender(taxonomy::gendered_subcategory_ids())
    }
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}
