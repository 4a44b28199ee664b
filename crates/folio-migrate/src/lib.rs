//! # folio-migrate
//!
//! The idempotent migration engine.
//!
//! A run pushes every [`SourceProject`](folio_core::SourceProject) through the
//! same sequence:
//! 1. resolve the category and each tag to a remote id by natural key
//!    ([`KeyResolver`]), creating records only when the backend has none;
//! 2. upload hero and gallery media at most once per normalized path
//!    ([`MediaDeduplicator`]);
//! 3. look the project up by slug and update or create it with every
//!    resolved id embedded ([`Migrator`]).
//!
//! [`RunCoordinator`] drives the projects serially, isolates per-project
//! failures and produces a [`RunReport`]. Resolution caches live only as long
//! as the coordinator; idempotency across runs comes from the slug lookups.

mod cache;
mod cancel;
mod error;
mod media;
mod payload;
mod project;
mod resolver;
mod run;

pub use cache::{KeyCache, MediaCache};
pub use cancel::CancellationToken;
pub use error::{MigrateError, ProjectError, Step};
pub use media::{MediaDeduplicator, MediaResolution, MediaStats, normalize_media_path};
pub use payload::{ProjectPayload, TaxonomyPayload, publish_timestamp};
pub use project::{Migrator, ProjectReport, UpsertAction};
pub use resolver::{KeyResolver, Origin, Resolved, ResolverStats};
pub use run::{
    ProjectFailure, RunCoordinator, RunEvent, RunOptions, RunReport, RunStats, preflight,
};
