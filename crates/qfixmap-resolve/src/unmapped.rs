//! Process-wide aggregation of terms the resolver could not map.
//!
//! A diagnostic aid for closing mapping gaps, not an audit log: state lives
//! in memory only and resets on restart. Entries are deduplicated by the
//! normalized value and brand so cosmetic variants of the same gap surface
//! as one entry with a count.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use qfixmap_core::normalize::normalize_text;
use qfixmap_core::UnmappedEntry;

#[derive(Debug, Default)]
pub struct UnmappedTracker {
    inner: RwLock<HashMap<(String, String), UnmappedEntry>>,
}

impl UnmappedTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of an unresolvable value for a brand.
    ///
    /// The first-seen raw form is retained for display; later occurrences
    /// under cosmetic variants (casing, whitespace, diacritics) only bump
    /// the count.
    pub fn record(&self, raw_value: &str, brand: &str) {
        let key = (normalize_text(raw_value), normalize_text(brand));
        let mut inner = self.write();
        let entry = inner.entry(key).or_insert_with(|| UnmappedEntry {
            raw_value: raw_value.trim().to_string(),
            source_brand: brand.trim().to_string(),
            occurrence_count: 0,
        });
        entry.occurrence_count += 1;
        tracing::info!(
            value = %entry.raw_value,
            brand = %entry.source_brand,
            count = entry.occurrence_count,
            "unmapped term recorded"
        );
    }

    /// All entries, sorted by descending occurrence count, then raw value.
    #[must_use]
    pub fn list(&self) -> Vec<UnmappedEntry> {
        let mut entries: Vec<UnmappedEntry> = self.read().values().cloned().collect();
        entries.sort_by(|a, b| {
            b.occurrence_count
                .cmp(&a.occurrence_count)
                .then_with(|| a.raw_value.cmp(&b.raw_value))
        });
        entries
    }

    /// Entries grouped by brand, each group sorted like [`Self::list`].
    #[must_use]
    pub fn by_brand(&self) -> BTreeMap<String, Vec<UnmappedEntry>> {
        let mut grouped: BTreeMap<String, Vec<UnmappedEntry>> = BTreeMap::new();
        for entry in self.list() {
            grouped
                .entry(entry.source_brand.clone())
                .or_default()
                .push(entry);
        }
        grouped
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<(String, String), UnmappedEntry>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<(String, String), UnmappedEntry>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_record_creates_entry_with_count_one() {
        let tracker = UnmappedTracker::new();
        tracker.record("coatsjackets > kappor", "ginatricot");
        let entries = tracker.list();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].raw_value, "coatsjackets > kappor");
        assert_eq!(entries[0].source_brand, "ginatricot");
        assert_eq!(entries[0].occurrence_count, 1);
    }

    #[test]
    fn repeat_record_increments_instead_of_duplicating() {
        let tracker = UnmappedTracker::new();
        tracker.record("coatsjackets > kappor", "ginatricot");
        tracker.record("coatsjackets > kappor", "ginatricot");
        let entries = tracker.list();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].occurrence_count, 2);
    }

    #[test]
    fn cosmetic_variants_collapse_to_one_entry() {
        let tracker = UnmappedTracker::new();
        tracker.record("Vårjackor", "kappahl");
        tracker.record("  vårjackor ", "kappahl");
        tracker.record("VARJACKOR", "kappahl");
        let entries = tracker.list();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].raw_value, "Vårjackor", "first-seen form kept");
        assert_eq!(entries[0].occurrence_count, 3);
    }

    #[test]
    fn same_value_different_brands_stay_separate() {
        let tracker = UnmappedTracker::new();
        tracker.record("kappor", "ginatricot");
        tracker.record("kappor", "lindex");
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn list_sorts_by_count_then_value() {
        let tracker = UnmappedTracker::new();
        tracker.record("bbb", "kappahl");
        tracker.record("aaa", "kappahl");
        tracker.record("ccc", "kappahl");
        tracker.record("ccc", "kappahl");
        let entries = tracker.list();
        assert_eq!(entries[0].raw_value, "ccc");
        assert_eq!(entries[1].raw_value, "aaa");
        assert_eq!(entries[2].raw_value, "bbb");
    }

    #[test]
    fn by_brand_groups_entries() {
        let tracker = UnmappedTracker::new();
        tracker.record("kappor", "ginatricot");
        tracker.record("koftor", "ginatricot");
        tracker.record("neopren", "lindex");
        let grouped = tracker.by_brand();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["ginatricot"].len(), 2);
        assert_eq!(grouped["lindex"].len(), 1);
    }

    #[test]
    fn empty_tracker_lists_nothing() {
        let tracker = UnmappedTracker::new();
        assert!(tracker.is_empty());
        assert!(tracker.list().is_empty());
        assert!(tracker.by_brand().is_empty());
    }
}
