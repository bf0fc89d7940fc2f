//! # magma-core
//!
//! Core types and pure logic for Magma, the compliance project scaffolder.
//!
//! This crate provides the foundational types shared across all Magma crates:
//! - Entity structs for all persisted objects (projects, documents, auditors, etc.)
//! - Status enums, page kinds, and relation tags
//! - ID prefix constants
//! - Cross-cutting error types
//! - The SCF config document, its catalog lookup, and narrative rendering
//! - Typed JSON payloads (auditor instructions, suggested sources, page trees)
//! - Content fingerprints
//! - Response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod fingerprint;
pub mod ids;
pub mod payloads;
pub mod responses;
pub mod scf;
pub mod seed;
