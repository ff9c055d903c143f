#![forbid(unsafe_code)]

pub mod error;
pub mod naming;

pub mod discover;
pub mod header;

pub mod bundle;
pub mod inspect;

pub mod archiver;

// Re-exports: stable API surface
pub use archiver::{ArchiveOptions, BundleOutcome, RunSummary, run};
pub use discover::{Discovery, Skip, SkipReason, discover};
pub use error::{EddError, Result};
pub use inspect::{MemberRow, list_members, verify_pair};
pub use naming::{NamingScheme, Pair};
