//! ID prefix constants.
//!
//! Every persisted row carries a prefixed random ID such as `doc-3f9a1c0b7e2d4a55`.
//! The random part is produced in SQL by `MagmaDb::generate_id`.

pub const PREFIX_ORGANIZATION: &str = "org";
pub const PREFIX_PROJECT: &str = "prj";
pub const PREFIX_DOCUMENT: &str = "doc";
pub const PREFIX_RELATION: &str = "rel";
pub const PREFIX_EVIDENCE_REQUEST: &str = "evr";
pub const PREFIX_AUDITOR: &str = "adt";
pub const PREFIX_TEMPLATE: &str = "tpl";
pub const PREFIX_COLLECTION: &str = "col";
pub const PREFIX_EVIDENCE: &str = "evi";
pub const PREFIX_AUDIT: &str = "aud";

/// All prefixes, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_ORGANIZATION,
    PREFIX_PROJECT,
    PREFIX_DOCUMENT,
    PREFIX_RELATION,
    PREFIX_EVIDENCE_REQUEST,
    PREFIX_AUDITOR,
    PREFIX_TEMPLATE,
    PREFIX_COLLECTION,
    PREFIX_EVIDENCE,
    PREFIX_AUDIT,
];

/// Number of hex characters in the random part of an ID.
pub const RANDOM_HEX_LEN: usize = 16;
