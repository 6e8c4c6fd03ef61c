mod allocator;
mod batch;
pub mod columns;
mod diff;
mod directory;
mod flags;
mod names;
mod teams;

pub use allocator::{EXTENSION_WIDTH, ExtensionAllocator};
pub use batch::{BatchOutcome, Diagnostics, Reconciler};
pub use columns::{ColumnMap, REQUIRED_COLUMNS};
pub use diff::{Comparison, compare, record_emails, table_emails};
pub use directory::{Directory, IdentityMatch, lookup_key};
pub use flags::{apply_role_flags, apply_team_flags, assign_single_team};
pub use names::split_name;
pub use teams::{ResolvedTeam, TeamRegistry};
