//! Reconciles imported user spreadsheets against the platform directory.
//!
//! The [`engine`] turns rows of a [`model::Table`] into finished
//! [`model::UserRecord`]s: it splits names, matches identities by name against
//! a [`model::DirectorySnapshot`], resolves the governing team, allocates
//! collision-free extensions and sets role/team flags. [`io`] reads
//! spreadsheets and writes the JSON/CSV exports.

pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod model;

pub use error::SyncError;
