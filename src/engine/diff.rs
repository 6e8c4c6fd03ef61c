use std::collections::BTreeSet;

use super::columns::{ColumnMap, EMAIL};
use crate::error::SyncError;
use crate::model::{Table, UserRecord};

/// Keys present in both, only in the new set, and only in the old set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    pub common: BTreeSet<String>,
    pub added: BTreeSet<String>,
    pub removed: BTreeSet<String>,
}

impl Comparison {
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Set difference between an `old` and a `new` collection of keys.
pub fn compare<O, N>(old: O, new: N) -> Comparison
where
    O: IntoIterator,
    O::Item: AsRef<str>,
    N: IntoIterator,
    N::Item: AsRef<str>,
{
    let old: BTreeSet<String> = old.into_iter().map(|k| k.as_ref().to_string()).collect();
    let new: BTreeSet<String> = new.into_iter().map(|k| k.as_ref().to_string()).collect();

    Comparison {
        common: old.intersection(&new).cloned().collect(),
        added: new.difference(&old).cloned().collect(),
        removed: old.difference(&new).cloned().collect(),
    }
}

/// Emails of already-built records.
pub fn record_emails(records: &[UserRecord]) -> impl Iterator<Item = &str> {
    records.iter().map(|r| r.email.as_str())
}

/// Non-blank emails of a table, which only needs an email column.
pub fn table_emails(table: &Table) -> Result<Vec<&str>, SyncError> {
    let columns = ColumnMap::resolve(&table.headers, &[EMAIL])?;
    Ok(table
        .rows
        .iter()
        .filter_map(|row| columns.get_trimmed(row, EMAIL))
        .collect())
}
