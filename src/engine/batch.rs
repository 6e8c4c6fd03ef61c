use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use super::allocator::ExtensionAllocator;
use super::columns::{
    AGENT_NUMBER, CHAT_LIMIT, ColumnMap, EMAIL, FIRST_NAME, REQUIRED_COLUMNS, SURNAME, TEAM, TITLE,
};
use super::directory::Directory;
use super::flags::{apply_role_flags, apply_team_flags};
use super::names::split_name;
use super::teams::TeamRegistry;
use crate::error::SyncError;
use crate::model::{Table, Template, UserRecord};

/// Non-fatal findings of a batch, for the operator to review.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Row teams that the template does not list. The rows are still produced.
    pub unmatched_teams: BTreeSet<String>,
    /// Row teams with no numeric id, so no extension could be generated.
    pub teams_without_id: BTreeSet<String>,
    /// Teams whose extension range is full.
    pub exhausted_teams: BTreeSet<String>,
    /// Emails of rows whose chat limit was not a number; their limit was cleared.
    pub invalid_chat_limits: Vec<String>,
    /// Rows dropped for having no email.
    pub skipped_rows: usize,
}

impl Diagnostics {
    /// Nothing to report, not even a skipped row.
    pub fn is_clean(&self) -> bool {
        self.skipped_rows == 0
            && self.unmatched_teams.is_empty()
            && self.teams_without_id.is_empty()
            && self.exhausted_teams.is_empty()
            && self.invalid_chat_limits.is_empty()
    }
}

/// Finished records in input order, plus what went wrong along the way.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub records: Vec<UserRecord>,
    pub diagnostics: Diagnostics,
}

impl BatchOutcome {
    pub fn new_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_new).count()
    }
}

/// Turns imported rows into platform records against one directory snapshot.
pub struct Reconciler<'a> {
    template: &'a Template,
    directory: &'a Directory,
    registry: &'a TeamRegistry,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        template: &'a Template,
        directory: &'a Directory,
        registry: &'a TeamRegistry,
    ) -> Self {
        Self {
            template,
            directory,
            registry,
        }
    }

    /// Processes every row of `table` in order.
    ///
    /// Extensions are generated only when an `allocator` is given. A missing
    /// required column fails the whole batch before any row is looked at.
    pub fn run(
        &self,
        table: &Table,
        mut allocator: Option<&mut ExtensionAllocator>,
    ) -> Result<BatchOutcome, SyncError> {
        let columns = ColumnMap::resolve(&table.headers, REQUIRED_COLUMNS)?;
        if !columns.has(CHAT_LIMIT) {
            debug!("input has no chat limit column, every limit will be cleared");
        }
        let mut outcome = BatchOutcome::default();

        for row in &table.rows {
            let Some(email) = columns.get_trimmed(row, EMAIL) else {
                outcome.diagnostics.skipped_rows += 1;
                continue;
            };
            let record = self.reconcile_row(
                &columns,
                row,
                email,
                allocator.as_deref_mut(),
                &mut outcome.diagnostics,
            );
            debug!(
                email = %record.email,
                is_new = record.is_new,
                extension = %record.extension_number,
                "row reconciled"
            );
            outcome.records.push(record);
        }

        info!(
            records = outcome.records.len(),
            new = outcome.new_count(),
            skipped = outcome.diagnostics.skipped_rows,
            "batch processed"
        );
        Ok(outcome)
    }

    fn reconcile_row(
        &self,
        columns: &ColumnMap,
        row: &[Option<String>],
        email: &str,
        allocator: Option<&mut ExtensionAllocator>,
        diagnostics: &mut Diagnostics,
    ) -> UserRecord {
        let team = columns.get_trimmed(row, TEAM);
        let (first_name, last_name) = split_name(
            columns.get(row, FIRST_NAME),
            columns.get(row, SURNAME),
        );
        let identity = self.directory.match_identity(&first_name, &last_name, team);

        let extension = match allocator {
            Some(allocator) => {
                self.allocate_extension(allocator, &identity.active_teams, team, diagnostics)
            }
            None => String::new(),
        };

        let mut record = self.template.instantiate();
        record.is_new = identity.is_new;
        record.email = email.to_string();
        record.first_name = first_name;
        record.last_name = last_name;
        record.agent_number = columns.get_trimmed(row, AGENT_NUMBER).map(str::to_string);
        record.extension_number = extension;
        record.location.clear();
        record.alias.clear();
        record.new_email.clear();

        let title = columns.get(row, TITLE).unwrap_or_default();
        apply_role_flags(&mut record.roles, title);
        apply_team_flags(&mut record.teams, &identity.active_teams);

        if let Some(team) = team
            && !self.template.knows_team(team)
        {
            warn!(team, email, "team is not listed in the template");
            diagnostics.unmatched_teams.insert(team.to_string());
        }

        match columns.get_trimmed(row, CHAT_LIMIT) {
            Some(raw) => match parse_chat_limit(raw) {
                Some(limit) => {
                    record.max_chat_limit = limit.to_string();
                    record.max_chat_limit_enabled = true;
                }
                None => {
                    warn!(email, value = raw, "chat limit is not a number, clearing it");
                    diagnostics.invalid_chat_limits.push(email.to_string());
                    clear_chat_limit(&mut record);
                }
            },
            None => clear_chat_limit(&mut record),
        }

        record
    }

    fn allocate_extension(
        &self,
        allocator: &mut ExtensionAllocator,
        active_teams: &BTreeSet<String>,
        stated_team: Option<&str>,
        diagnostics: &mut Diagnostics,
    ) -> String {
        let Some(resolved) = self.registry.resolve(active_teams) else {
            if let Some(team) = stated_team {
                warn!(team, "team has no numeric id, skipping extension");
                diagnostics.teams_without_id.insert(team.to_string());
            }
            return String::new();
        };

        match allocator.allocate(&resolved.prefix()) {
            Some(extension) => extension,
            None => {
                warn!(
                    team = %resolved.name,
                    prefix = resolved.id,
                    "no free extension left under team prefix"
                );
                diagnostics.exhausted_teams.insert(resolved.name);
                String::new()
            }
        }
    }
}

fn clear_chat_limit(record: &mut UserRecord) {
    record.max_chat_limit.clear();
    record.max_chat_limit_enabled = false;
}

/// Parses a spreadsheet number into a whole chat limit, truncating any fraction.
fn parse_chat_limit(raw: &str) -> Option<i64> {
    let value: f64 = raw.trim().parse().ok()?;
    value.is_finite().then(|| value.trunc() as i64)
}
