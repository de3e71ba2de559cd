//! Command handlers for the CLI.
//!
//! Called from `main` after the resolver is built. File-based commands take
//! JSON arrays in, print JSON or a plain-text report out; logs stay on
//! stderr.

use std::fs;
use std::path::Path;

use anyhow::Context;

use qfixmap_core::{CatalogRow, ProductRecord, ResolvedMapping};
use qfixmap_resolve::Resolver;

/// Resolve one set of attributes and print the outcome.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn run_resolve(
    resolver: &Resolver,
    clothing_type: &str,
    material: &str,
    gender: &str,
    brand: &str,
    json: bool,
) -> anyhow::Result<()> {
    let resolved = resolver.resolve(clothing_type, material, gender, brand);

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        print!("{}", format_resolved(&resolved));
    }
    Ok(())
}

/// Merge two record files and print the merged records as JSON.
///
/// # Errors
///
/// Returns an error if either file cannot be read or parsed.
pub(crate) fn run_merge(scraper_path: &Path, protocol_path: &Path) -> anyhow::Result<()> {
    let scraper: Vec<ProductRecord> = load_json(scraper_path)?;
    let protocol: Vec<ProductRecord> = load_json(protocol_path)?;

    let merged = qfixmap_merge::merge(&scraper, &protocol);
    println!("{}", serde_json::to_string_pretty(&merged)?);
    Ok(())
}

/// Resolve every row of a catalog file and print the unmapped report,
/// grouped by brand.
///
/// # Errors
///
/// Returns an error if the catalog file cannot be read or parsed.
pub(crate) fn run_unmapped(resolver: &Resolver, catalog_path: &Path) -> anyhow::Result<()> {
    let rows: Vec<CatalogRow> = load_json(catalog_path)?;
    for row in &rows {
        resolver.resolve_row(row);
    }

    let groups = resolver.unmapped().by_brand();
    if groups.is_empty() {
        println!("all {} rows resolved cleanly", rows.len());
        return Ok(());
    }

    for (brand, entries) in &groups {
        println!("BRAND: {brand} ({} unmapped)", entries.len());
        println!("  {:<8}VALUE", "COUNT");
        for entry in entries {
            println!("  {:<8}{}", entry.occurrence_count, entry.raw_value);
        }
        println!();
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn format_resolved(resolved: &ResolvedMapping) -> String {
    fn line(label: &str, name: Option<&str>, id: Option<i64>) -> String {
        match (name, id) {
            (Some(name), Some(id)) => format!("{label:<15}{name} ({id})\n"),
            (Some(name), None) => format!("{label:<15}{name}\n"),
            (None, Some(id)) => format!("{label:<15}({id})\n"),
            (None, None) => format!("{label:<15}\u{2014}\n"),
        }
    }

    let mut out = String::new();
    out.push_str(&line(
        "CLOTHING TYPE",
        resolved.qfix_clothing_type.as_deref(),
        resolved.qfix_clothing_type_id,
    ));
    out.push_str(&line(
        "MATERIAL",
        resolved.qfix_material.as_deref(),
        resolved.qfix_material_id,
    ));
    out.push_str(&line(
        "SUBCATEGORY",
        resolved.qfix_subcategory.as_deref(),
        resolved.qfix_subcategory_id,
    ));
    out.push_str(&format!("{:<15}{}\n", "URL", resolved.qfix_url));
    out
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_resolved_shows_names_with_ids() {
        let resolved = ResolvedMapping {
            qfix_clothing_type: Some("Trousers".to_string()),
            qfix_clothing_type_id: Some(174),
            qfix_material: Some("Standard textile".to_string()),
            qfix_material_id: Some(69),
            qfix_subcategory: Some("Women's Clothing".to_string()),
            qfix_subcategory_id: Some(55),
            qfix_url: "https://kappahl.dev.qfixr.me/sv/?category_id=174&material_id=69"
                .to_string(),
        };
        let text = format_resolved(&resolved);
        assert!(text.contains("Trousers (174)"));
        assert!(text.contains("Standard textile (69)"));
        assert!(text.contains("Women's Clothing (55)"));
        assert!(text.contains("?category_id=174&material_id=69"));
    }

    #[test]
    fn format_resolved_marks_absent_fields() {
        let resolved = ResolvedMapping {
            qfix_clothing_type: None,
            qfix_clothing_type_id: None,
            qfix_material: None,
            qfix_material_id: None,
            qfix_subcategory: None,
            qfix_subcategory_id: None,
            qfix_url: "https://kappahl.dev.qfixr.me/sv/".to_string(),
        };
        let text = format_resolved(&resolved);
        assert_eq!(text.matches('\u{2014}').count(), 3);
        assert!(text.contains("https://kappahl.dev.qfixr.me/sv/"));
    }

    #[test]
    fn load_json_reports_missing_file() {
        let err = load_json::<Vec<ProductRecord>>(Path::new("/nonexistent/products.json"))
            .expect_err("missing file should fail");
        assert!(err.to_string().contains("reading"));
    }

    #[test]
    fn load_json_reads_catalog_rows() {
        let path = std::env::temp_dir().join(format!("qfixmap-cli-rows-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"[{
                "identity_key": "123456",
                "name": "Slim jeans",
                "clothing_type": "Dam > Jeans",
                "material_composition": "99% Bomull, 1% Elastan",
                "gender_category": "dam",
                "brand": "kappahl"
            }]"#,
        )
        .expect("write temp file");

        let rows: Vec<CatalogRow> = load_json(&path).expect("parse rows");
        fs::remove_file(&path).ok();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].brand, "kappahl");
        assert_eq!(rows[0].clothing_type, "Dam > Jeans");
    }
}
