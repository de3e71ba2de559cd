//! Text canonicalization and composition-string parsing.
//!
//! Catalog text arrives in mixed casing, mixed whitespace, and two languages
//! (Swedish and English). Every lookup key in the mapping tables goes through
//! [`normalize_text`] first so that cosmetic variants of the same term
//! collapse to a single key. Composition strings are parsed with manual byte
//! scanning rather than `regex` to stay dependency-light.

/// Canonicalizes a free-text value into a stable lookup key.
///
/// Lower-cases, trims, collapses internal whitespace runs to single spaces,
/// and folds Latin diacritics to their base letter (å→a, ö→o, é→e, ...).
/// Idempotent: `normalize_text(normalize_text(s)) == normalize_text(s)`.
#[must_use]
pub fn normalize_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for c in s.trim().chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        for lower in c.to_lowercase() {
            out.push(fold_char(lower));
        }
    }
    out
}

/// Splits a raw breadcrumb string on `>` and normalizes each segment.
/// Empty segments (doubled or trailing delimiters) are dropped.
#[must_use]
pub fn split_breadcrumb(s: &str) -> Vec<String> {
    s.split('>')
        .map(normalize_text)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Extracts `(percentage, material)` pairs from a free-text composition
/// string such as `"99% Bomull, 1% Elastan"`.
///
/// Pairs are ordered by descending percentage; equal percentages keep their
/// input order. Material names are normalized and stripped of parenthetical
/// certification suffixes (`"bomull (ekologisk)"` → `"bomull"`). Malformed
/// segments are skipped, never fatal: an input where nothing parses yields
/// an empty vector. Percentages are not range-checked.
#[must_use]
pub fn parse_composition(s: &str) -> Vec<(u32, String)> {
    let mut pairs: Vec<(u32, String)> = Vec::new();
    for segment in s.split(',') {
        if let Some(pair) = parse_composition_segment(segment) {
            pairs.push(pair);
        }
    }
    // Stable sort: ties keep input order, so the first-listed material wins.
    pairs.sort_by(|a, b| b.0.cmp(&a.0));
    pairs
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Folds one pre-lowercased character to its undecorated base letter.
fn fold_char(c: char) -> char {
    match c {
        'å' | 'ä' | 'à' | 'á' | 'â' | 'ã' => 'a',
        'ö' | 'ò' | 'ó' | 'ô' | 'õ' | 'ø' => 'o',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ü' | 'ù' | 'ú' | 'û' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        _ => c,
    }
}

/// Parses one comma-separated composition segment: a digit run, optional
/// spaces, a literal `%`, then the material name. Returns `None` when the
/// segment carries no percentage or no name.
fn parse_composition_segment(segment: &str) -> Option<(u32, String)> {
    let bytes = segment.as_bytes();
    let len = bytes.len();
    let mut i = 0usize;

    while i < len {
        if bytes[i].is_ascii_digit() {
            let num_start = i;
            while i < len && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let num_str = &segment[num_start..i];

            let mut scan = i;
            while scan < len && bytes[scan] == b' ' {
                scan += 1;
            }

            if scan < len && bytes[scan] == b'%' {
                let percentage = num_str.parse::<u32>().ok()?;
                let name = material_name(&segment[scan + 1..]);
                if name.is_empty() {
                    return None;
                }
                return Some((percentage, name));
            }
            // Number without a following '%': keep scanning the segment.
        } else {
            i += 1;
        }
    }
    None
}

/// Normalizes the text after a `%` into a bare material term, cutting off
/// parenthetical suffixes.
fn material_name(rest: &str) -> String {
    let cut = rest.find('(').unwrap_or(rest.len());
    normalize_text(&rest[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // normalize_text
    // -----------------------------------------------------------------------

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(normalize_text("  Jackor & Rockar  "), "jackor & rockar");
    }

    #[test]
    fn normalize_collapses_internal_whitespace() {
        assert_eq!(normalize_text("jackor  &\t rockar"), "jackor & rockar");
    }

    #[test]
    fn normalize_folds_swedish_letters() {
        assert_eq!(normalize_text("Vårjackor"), "varjackor");
        assert_eq!(normalize_text("Klänningar"), "klanningar");
        assert_eq!(normalize_text("Tröjor"), "trojor");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["  Vår-Jackor  ", "KLÄNNINGAR", "tröjor  & cardigans", "é ü ñ"] {
            let once = normalize_text(raw);
            assert_eq!(normalize_text(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn normalize_empty_input_yields_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   "), "");
    }

    // -----------------------------------------------------------------------
    // split_breadcrumb
    // -----------------------------------------------------------------------

    #[test]
    fn breadcrumb_splits_and_normalizes_segments() {
        assert_eq!(
            split_breadcrumb("Dam > Jackor & rockar > Vårjackor"),
            vec!["dam", "jackor & rockar", "varjackor"]
        );
    }

    #[test]
    fn breadcrumb_drops_empty_segments() {
        assert_eq!(split_breadcrumb("Byxor > "), vec!["byxor"]);
        assert_eq!(split_breadcrumb(" > > Byxor"), vec!["byxor"]);
    }

    #[test]
    fn breadcrumb_empty_input_yields_no_segments() {
        assert!(split_breadcrumb("").is_empty());
        assert!(split_breadcrumb(" > ").is_empty());
    }

    // -----------------------------------------------------------------------
    // parse_composition
    // -----------------------------------------------------------------------

    #[test]
    fn composition_basic_two_materials() {
        assert_eq!(
            parse_composition("99% Bomull, 1% Elastan"),
            vec![(99, "bomull".to_string()), (1, "elastan".to_string())]
        );
    }

    #[test]
    fn composition_sorted_by_descending_percentage() {
        assert_eq!(
            parse_composition("2% Elastan, 68% Bomull, 30% Polyester"),
            vec![
                (68, "bomull".to_string()),
                (30, "polyester".to_string()),
                (2, "elastan".to_string())
            ]
        );
    }

    #[test]
    fn composition_tie_keeps_input_order() {
        assert_eq!(
            parse_composition("50% Ull, 50% Polyester"),
            vec![(50, "ull".to_string()), (50, "polyester".to_string())]
        );
    }

    #[test]
    fn composition_space_before_percent_sign() {
        assert_eq!(
            parse_composition("100 % Bomull"),
            vec![(100, "bomull".to_string())]
        );
    }

    #[test]
    fn composition_strips_parenthetical_certification() {
        assert_eq!(
            parse_composition("95% Bomull (ekologisk), 5% Elastan"),
            vec![(95, "bomull".to_string()), (5, "elastan".to_string())]
        );
    }

    #[test]
    fn composition_skips_malformed_segments() {
        assert_eq!(
            parse_composition("huvudmaterial, 80% Polyester, 20% Viskos"),
            vec![(80, "polyester".to_string()), (20, "viskos".to_string())]
        );
    }

    #[test]
    fn composition_percent_without_name_is_skipped() {
        assert_eq!(
            parse_composition("60% , 40% Lyocell"),
            vec![(40, "lyocell".to_string())]
        );
    }

    #[test]
    fn composition_nothing_parseable_yields_empty() {
        assert!(parse_composition("Skaltyg: se etikett").is_empty());
        assert!(parse_composition("").is_empty());
    }

    #[test]
    fn composition_single_material() {
        assert_eq!(
            parse_composition("100% Kashmir"),
            vec![(100, "kashmir".to_string())]
        );
    }
}
