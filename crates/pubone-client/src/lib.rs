//! pubone-client: async client for the NCBI PubOne identity registry
//!
//! This library provides pure Rust implementations of:
//! - PMID / PMCID pair validation against the registry
//! - Bulk record, citation, and CSL-JSON retrieval with length-bounded
//!   query batching
//! - Identifier normalization, including the registry's versioned-PMCID
//!   quirk (`"PMC6081977.3"` carries a spurious version suffix)
//!
//! All HTTP traffic goes through a [`session::Session`], which owns retry,
//! backoff, and timeout policy; the validation and batching logic never
//! retries on its own.

mod batch;

pub mod client;
pub mod error;
pub mod identifiers;
pub mod session;
pub mod validate;

// Re-export main types for convenience
pub use client::{Endpoint, PubOneClient, PUBONE_EP};
pub use error::Error;
pub use identifiers::{normalize_pmcid, normalize_pmid};
pub use session::{Session, SessionConfig, SessionError};
pub use validate::ValidatedArticle;
