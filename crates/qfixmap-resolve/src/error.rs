use thiserror::Error;

use crate::table::MappingKind;

/// Rejection reasons for mapping-table mutations. These are the only hard
/// errors the resolution core propagates; unresolvable catalog input is
/// recorded, not raised.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("unknown mapping kind '{given}'; expected clothing_type or material")]
    UnknownKind { given: String },

    #[error("mapping source must be non-empty")]
    EmptySource,

    #[error("mapping target must be non-empty")]
    EmptyTarget,

    #[error("unknown {kind} target '{given}'; valid targets: {}", .valid.join(", "))]
    UnknownTarget {
        kind: MappingKind,
        given: String,
        valid: Vec<String>,
    },
}
