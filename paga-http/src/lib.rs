#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP transport for the Paga Business REST API.
//!
//! This crate dispatches the signed envelopes built by the `paga` core
//! crate over HTTP and interprets the provider's JSON responses. The core
//! distinction it enforces: a signature being accepted is not the same as
//! the operation succeeding — a well-formed response with a non-zero
//! `responseCode` is a business failure and is surfaced as such with the
//! full provider payload attached.
//!
//! # Modules
//!
//! - [`client`] - The async [`client::BusinessClient`]
//! - [`constants`] - Service path and header names
//! - [`error`] - Transport, protocol, and business error types
//! - [`types`] - Typed response bodies
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation of request dispatch

pub mod client;
pub mod constants;
pub mod error;
pub mod types;

pub use client::{BusinessClient, ClientConfig};
pub use error::ClientError;
