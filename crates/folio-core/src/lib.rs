//! # folio-core
//!
//! Core types and pure helpers shared by every Folio crate:
//! - Source export records (`SourceProject`, `MediaReference`) and export parsing
//! - Remote entity kinds and identifiers
//! - Natural-key (slug) derivation
//! - SEO description truncation
//! - Cross-cutting error types

pub mod errors;
pub mod export;
pub mod kind;
pub mod remote;
pub mod seo;
pub mod slug;
pub mod source;

pub use errors::CoreError;
pub use kind::EntityKind;
pub use remote::{Asset, RemoteEntity, RemoteId};
pub use source::{MediaReference, SourceProject, Year};
