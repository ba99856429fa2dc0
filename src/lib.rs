//! Fetches a Figma file and turns it into design tokens.
//!
//! The extraction itself lives in [`tokens`]; this crate adds the
//! configuration, the HTTP client and the mode dispatch used by the
//! `figma-tokens` binary.

pub use figma_tokens_core as tokens;

pub mod client;
pub mod config;
pub mod error;
pub mod file_ref;
pub mod report;

pub use client::FigmaClient;
pub use config::FigmaConfig;
pub use file_ref::FileRef;
pub use report::{extract, Mode, Report};
