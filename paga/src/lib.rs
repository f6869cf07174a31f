#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the Paga Business REST API.
//!
//! This crate provides the reusable core of a Paga Business API client: the
//! request-signing scheme, per-operation signature recipes, and signed
//! envelope construction. It performs no network I/O — dispatch belongs to a
//! transport such as the `paga-http` crate.
//!
//! # Overview
//!
//! Every Business API call is a JSON POST authenticated by three headers:
//! the account `principal`, the account `credentials`, and a `hash` — the
//! SHA-512 digest of an operation-specific concatenation of transmitted
//! field values with a shared hash key appended. The hash key itself is
//! never sent.
//!
//! ```rust
//! use paga::credentials::Credentials;
//! use paga::envelope::{OperationFields, SignedEnvelope};
//! use paga::operation::Operation;
//! use paga::signature::new_reference_number;
//!
//! let credentials = Credentials::new("https://beta.mypaga.com", "org", "secret", "hash-key");
//! let reference = new_reference_number(Operation::GetBanks.reference_prefix());
//! let envelope = SignedEnvelope::build_for(
//!     Operation::GetBanks,
//!     &credentials,
//!     &reference,
//!     &OperationFields::new(),
//! )?;
//! assert_eq!(envelope.headers.hash.len(), 128);
//! # Ok::<(), paga::error::BuildError>(())
//! ```
//!
//! # Modules
//!
//! - [`credentials`] - Immutable account credentials and environment loading
//! - [`envelope`] - Signed envelope construction
//! - [`error`] - Error types shared across the SDK
//! - [`operation`] - Known operations and their signature recipes
//! - [`signature`] - SHA-512 signing and reference-number generation

pub mod credentials;
pub mod envelope;
pub mod error;
pub mod operation;
pub mod signature;
