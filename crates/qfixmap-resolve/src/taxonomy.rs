//! The QFix repair-portal taxonomy: canonical category, subcategory, and
//! material identifiers, plus the seed rules that map retail vocabulary onto
//! them.
//!
//! The ID tables fix the target space; the seed slices below cover the
//! Swedish and English wording of the five supported catalogs. Seed source
//! terms are written as they appear in the catalogs and are normalized when
//! loaded into a [`crate::table::MappingTable`].

use std::collections::BTreeMap;

use qfixmap_core::gender::Gender;

/// Clothing-type name → booking category ID.
pub const CLOTHING_TYPE_IDS: &[(&str, i64)] = &[
    ("Jacket", 173),
    ("Unlined Jacket / Vest", 62),
    ("Lined Jacket / Vest", 61),
    ("Coat", 60),
    ("Top / T-shirt", 90),
    ("T-shirt", 163),
    ("Shirt / Blouse", 89),
    ("Knitted Jumper", 193),
    ("Sweater", 162),
    ("Sweatshirt / Hoodie", 196),
    ("Midlayer", 161),
    ("Trousers", 174),
    ("Trousers / Shorts", 104),
    ("Skirt / Dress", 66),
    ("Suit", 86),
    ("Swimsuit", 168),
    ("Bikini", 201),
    ("Swimming trunks", 169),
    ("Underwear", 171),
    ("Overall", 175),
    ("Overalls", 160),
    ("Hat", 98),
    ("Cap", 99),
    ("Gloves", 100),
    ("Scarf / Shawl", 101),
    ("Belt", 102),
    ("Handbags", 123),
    ("Other", 105),
];

/// Subcategory name → subcategory ID.
pub const SUBCATEGORY_IDS: &[(&str, i64)] = &[
    ("Outerwear", 54),
    ("Women's Clothing", 55),
    ("Men's Clothing", 56),
    ("Children's Clothing", 58),
    ("Accessories", 57),
    ("Swimwear / Wet suits", 167),
];

/// Material name → material ID, for the clothing repair context.
pub const MATERIAL_IDS: &[(&str, i64)] = &[
    ("Standard textile", 69),
    ("Linen / Wool", 166),
    ("Cashmere", 159),
    ("Silk", 213),
    ("Leather / Suede", 71),
    ("Down", 176),
    ("Fur", 72),
    ("Other / Unsure", 73),
    ("Highvis textile", 83),
];

/// Subcategory wiring of a seed rule: either the same subcategory for every
/// gender, or the gendered clothing subcategories selected at resolve time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SeedSubcategory {
    Gendered,
    Fixed(&'static str),
}

/// Clothing-type seed rules: `(source breadcrumb, target name, subcategory)`.
/// Breadcrumb segments are separated by `>` and may carry diacritics; they
/// are normalized on load.
pub(crate) const CLOTHING_TYPE_SEEDS: &[(&str, &str, SeedSubcategory)] = &[
    // Swedish — outerwear
    ("jackor & rockar", "Jacket", SeedSubcategory::Fixed("Outerwear")),
    (
        "jackor & rockar > kappor & rockar",
        "Coat",
        SeedSubcategory::Fixed("Outerwear"),
    ),
    ("jackor", "Jacket", SeedSubcategory::Fixed("Outerwear")),
    ("dunjackor", "Jacket", SeedSubcategory::Fixed("Outerwear")),
    ("kappor", "Coat", SeedSubcategory::Fixed("Outerwear")),
    ("rockar", "Coat", SeedSubcategory::Fixed("Outerwear")),
    ("västar", "Unlined Jacket / Vest", SeedSubcategory::Fixed("Outerwear")),
    // Swedish — garments
    ("byxor", "Trousers", SeedSubcategory::Gendered),
    ("byxor & shorts", "Trousers / Shorts", SeedSubcategory::Gendered),
    ("shorts", "Trousers / Shorts", SeedSubcategory::Gendered),
    ("jeans", "Trousers", SeedSubcategory::Gendered),
    ("chinos", "Trousers", SeedSubcategory::Gendered),
    ("klänningar", "Skirt / Dress", SeedSubcategory::Gendered),
    ("kjolar", "Skirt / Dress", SeedSubcategory::Gendered),
    ("klänningar & kjolar", "Skirt / Dress", SeedSubcategory::Gendered),
    ("skjortor", "Shirt / Blouse", SeedSubcategory::Gendered),
    ("blusar", "Shirt / Blouse", SeedSubcategory::Gendered),
    ("blusar & skjortor", "Shirt / Blouse", SeedSubcategory::Gendered),
    ("toppar", "Top / T-shirt", SeedSubcategory::Gendered),
    ("linnen", "Top / T-shirt", SeedSubcategory::Gendered),
    ("t-shirts", "T-shirt", SeedSubcategory::Gendered),
    ("t-shirts & toppar", "Top / T-shirt", SeedSubcategory::Gendered),
    ("tröjor", "Sweater", SeedSubcategory::Gendered),
    ("tröjor & cardigans", "Knitted Jumper", SeedSubcategory::Gendered),
    ("stickat", "Knitted Jumper", SeedSubcategory::Gendered),
    ("stickade tröjor", "Knitted Jumper", SeedSubcategory::Gendered),
    (
        "sweatshirts & hoodies",
        "Sweatshirt / Hoodie",
        SeedSubcategory::Gendered,
    ),
    ("hoodies", "Sweatshirt / Hoodie", SeedSubcategory::Gendered),
    ("underkläder", "Underwear", SeedSubcategory::Gendered),
    ("overaller", "Overall", SeedSubcategory::Gendered),
    ("kostymer", "Suit", SeedSubcategory::Gendered),
    // Swedish — swimwear
    (
        "badkläder",
        "Swimsuit",
        SeedSubcategory::Fixed("Swimwear / Wet suits"),
    ),
    (
        "badkläder > bikinis",
        "Bikini",
        SeedSubcategory::Fixed("Swimwear / Wet suits"),
    ),
    (
        "badkläder > badbyxor",
        "Swimming trunks",
        SeedSubcategory::Fixed("Swimwear / Wet suits"),
    ),
    (
        "baddräkter",
        "Swimsuit",
        SeedSubcategory::Fixed("Swimwear / Wet suits"),
    ),
    ("bikinis", "Bikini", SeedSubcategory::Fixed("Swimwear / Wet suits")),
    (
        "badbyxor",
        "Swimming trunks",
        SeedSubcategory::Fixed("Swimwear / Wet suits"),
    ),
    // Swedish — accessories
    ("accessoarer", "Other", SeedSubcategory::Fixed("Accessories")),
    (
        "accessoarer > mössor",
        "Hat",
        SeedSubcategory::Fixed("Accessories"),
    ),
    (
        "accessoarer > kepsar",
        "Cap",
        SeedSubcategory::Fixed("Accessories"),
    ),
    (
        "accessoarer > vantar & handskar",
        "Gloves",
        SeedSubcategory::Fixed("Accessories"),
    ),
    (
        "accessoarer > halsdukar & sjalar",
        "Scarf / Shawl",
        SeedSubcategory::Fixed("Accessories"),
    ),
    (
        "accessoarer > skärp",
        "Belt",
        SeedSubcategory::Fixed("Accessories"),
    ),
    (
        "accessoarer > väskor",
        "Handbags",
        SeedSubcategory::Fixed("Accessories"),
    ),
    ("mössor", "Hat", SeedSubcategory::Fixed("Accessories")),
    ("kepsar", "Cap", SeedSubcategory::Fixed("Accessories")),
    ("vantar", "Gloves", SeedSubcategory::Fixed("Accessories")),
    ("handskar", "Gloves", SeedSubcategory::Fixed("Accessories")),
    ("halsdukar", "Scarf / Shawl", SeedSubcategory::Fixed("Accessories")),
    ("sjalar", "Scarf / Shawl", SeedSubcategory::Fixed("Accessories")),
    ("skärp", "Belt", SeedSubcategory::Fixed("Accessories")),
    ("bälten", "Belt", SeedSubcategory::Fixed("Accessories")),
    ("väskor", "Handbags", SeedSubcategory::Fixed("Accessories")),
    // English
    ("coats & jackets", "Jacket", SeedSubcategory::Fixed("Outerwear")),
    ("coats", "Coat", SeedSubcategory::Fixed("Outerwear")),
    ("jackets", "Jacket", SeedSubcategory::Fixed("Outerwear")),
    ("outerwear", "Jacket", SeedSubcategory::Fixed("Outerwear")),
    ("dresses", "Skirt / Dress", SeedSubcategory::Gendered),
    ("skirts", "Skirt / Dress", SeedSubcategory::Gendered),
    ("trousers", "Trousers", SeedSubcategory::Gendered),
    ("denim", "Trousers", SeedSubcategory::Gendered),
    ("knitwear", "Knitted Jumper", SeedSubcategory::Gendered),
    ("shirts", "Shirt / Blouse", SeedSubcategory::Gendered),
    ("blouses", "Shirt / Blouse", SeedSubcategory::Gendered),
    ("tops", "Top / T-shirt", SeedSubcategory::Gendered),
    (
        "hoodies & sweatshirts",
        "Sweatshirt / Hoodie",
        SeedSubcategory::Gendered,
    ),
    ("suits", "Suit", SeedSubcategory::Gendered),
    (
        "swimwear",
        "Swimsuit",
        SeedSubcategory::Fixed("Swimwear / Wet suits"),
    ),
    ("underwear", "Underwear", SeedSubcategory::Gendered),
    ("overalls", "Overalls", SeedSubcategory::Gendered),
    ("accessories", "Other", SeedSubcategory::Fixed("Accessories")),
    (
        "accessories > bags",
        "Handbags",
        SeedSubcategory::Fixed("Accessories"),
    ),
    (
        "accessories > hats",
        "Hat",
        SeedSubcategory::Fixed("Accessories"),
    ),
    (
        "accessories > caps",
        "Cap",
        SeedSubcategory::Fixed("Accessories"),
    ),
    (
        "accessories > gloves",
        "Gloves",
        SeedSubcategory::Fixed("Accessories"),
    ),
    (
        "accessories > scarves",
        "Scarf / Shawl",
        SeedSubcategory::Fixed("Accessories"),
    ),
    (
        "accessories > belts",
        "Belt",
        SeedSubcategory::Fixed("Accessories"),
    ),
];

/// Keyword fallback seeds: `(keyword, target name)`. Matched by substring
/// against the joined normalized breadcrumb when no prefix rule applies.
pub(crate) const KEYWORD_SEEDS: &[(&str, &str)] = &[
    ("hoodie", "Sweatshirt / Hoodie"),
    ("sweatshirt", "Sweatshirt / Hoodie"),
    ("cardigan", "Knitted Jumper"),
    ("kavaj", "Suit"),
    ("blazer", "Suit"),
    ("parkas", "Jacket"),
    ("anorak", "Jacket"),
];

/// Material seeds: `(source term, target material name)`. Terms are
/// normalized on load.
pub(crate) const MATERIAL_SEEDS: &[(&str, &str)] = &[
    ("bomull", "Standard textile"),
    ("ekologisk bomull", "Standard textile"),
    ("cotton", "Standard textile"),
    ("organic cotton", "Standard textile"),
    ("polyester", "Standard textile"),
    ("återvunnen polyester", "Standard textile"),
    ("recycled polyester", "Standard textile"),
    ("elastan", "Standard textile"),
    ("elastane", "Standard textile"),
    ("spandex", "Standard textile"),
    ("viskos", "Standard textile"),
    ("viscose", "Standard textile"),
    ("lyocell", "Standard textile"),
    ("tencel", "Standard textile"),
    ("modal", "Standard textile"),
    ("polyamid", "Standard textile"),
    ("polyamide", "Standard textile"),
    ("nylon", "Standard textile"),
    ("akryl", "Standard textile"),
    ("acrylic", "Standard textile"),
    ("ull", "Linen / Wool"),
    ("merinoull", "Linen / Wool"),
    ("lammull", "Linen / Wool"),
    ("wool", "Linen / Wool"),
    ("merino wool", "Linen / Wool"),
    ("lin", "Linen / Wool"),
    ("linne", "Linen / Wool"),
    ("linen", "Linen / Wool"),
    ("kashmir", "Cashmere"),
    ("cashmere", "Cashmere"),
    ("siden", "Silk"),
    ("silke", "Silk"),
    ("silk", "Silk"),
    ("läder", "Leather / Suede"),
    ("leather", "Leather / Suede"),
    ("mocka", "Leather / Suede"),
    ("suede", "Leather / Suede"),
    ("skinn", "Leather / Suede"),
    ("dun", "Down"),
    ("down", "Down"),
    ("fjädrar", "Down"),
    ("päls", "Fur"),
    ("fur", "Fur"),
];

/// Booking category ID for a canonical clothing-type name. Exact match.
#[must_use]
pub fn clothing_type_id(name: &str) -> Option<i64> {
    CLOTHING_TYPE_IDS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, id)| *id)
}

/// Material ID for a canonical material name. Exact match.
#[must_use]
pub fn material_id(name: &str) -> Option<i64> {
    MATERIAL_IDS.iter().find(|(n, _)| *n == name).map(|(_, id)| *id)
}

/// Subcategory ID for a canonical subcategory name. Exact match.
#[must_use]
pub fn subcategory_id(name: &str) -> Option<i64> {
    SUBCATEGORY_IDS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, id)| *id)
}

/// Canonical subcategory name for an ID, when the ID is part of the table.
#[must_use]
pub fn subcategory_name_by_id(id: i64) -> Option<&'static str> {
    SUBCATEGORY_IDS
        .iter()
        .find(|(_, i)| *i == id)
        .map(|(name, _)| *name)
}

/// All valid clothing-type target names, in table order.
#[must_use]
pub fn clothing_type_names() -> Vec<&'static str> {
    CLOTHING_TYPE_IDS.iter().map(|(name, _)| *name).collect()
}

/// All valid material target names, in table order.
#[must_use]
pub fn material_names() -> Vec<&'static str> {
    MATERIAL_IDS.iter().map(|(name, _)| *name).collect()
}

/// The gendered clothing subcategory selected for a resolved gender.
/// Unisex has no gendered subcategory of its own.
#[must_use]
pub fn gendered_subcategory_label(gender: Gender) -> Option<&'static str> {
    match gender {
        Gender::Men => Some("Men's Clothing"),
        Gender::Women => Some("Women's Clothing"),
        Gender::Children => Some("Children's Clothing"),
        Gender::Unisex => None,
    }
}

/// The standard per-gender subcategory ID map used by gendered seed rules.
#[must_use]
pub(crate) fn gendered_subcategory_ids() -> BTreeMap<Gender, i64> {
    let mut map = BTreeMap::new();
    for gender in [Gender::Men, Gender::Women, Gender::Children] {
        if let Some(id) = gendered_subcategory_label(gender).and_then(subcategory_id) {
            map.insert(gender, id);
        }
    }
    map
}
