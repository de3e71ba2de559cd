//! Resolution engine for `qfixmap`.
//!
//! Holds the QFix target taxonomy, the runtime-mutable mapping table with
//! its seed rules, the breadcrumb/material resolution pipeline, the
//! unmapped-term tracker, and the deep-link URL builder.

mod error;
pub mod resolver;
pub mod table;
pub mod taxonomy;
pub mod unmapped;
pub mod url;

pub use error::MappingError;
pub use resolver::Resolver;
pub use table::{
    AddedMapping, ClothingTypeRule, KeywordRule, MappingKind, MappingTable, MaterialRule,
    SubcategoryRule, TableSnapshot,
};
pub use unmapped::UnmappedTracker;
pub use url::QfixUrl;
