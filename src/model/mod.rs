mod codec;
mod snapshot;
mod table;
mod template;

pub use snapshot::{Assignee, DirectorySnapshot, TeamSnapshot};
pub use table::{Table, normalize_header};
pub use template::{Capability, Template, UserRecord};

#[cfg(test)]
pub(crate) use snapshot::tests::sample_snapshot;
#[cfg(test)]
pub(crate) use template::tests::sample_template;
