use std::collections::BTreeSet;

use crate::error::SyncError;
use crate::model::{Capability, UserRecord};

/// Role granted to rows whose title is [`SUPERVISOR_TITLE`].
pub const MANAGER_ROLE: &str = "Manager Atendente";
pub const SUPERVISOR_TITLE: &str = "Supervisor";
/// Role granted to rows whose title is [`AGENT_TITLE`].
pub const AGENT_ROLE: &str = "Agent";
pub const AGENT_TITLE: &str = "Atendente";

/// Sets every role flag from the row's title; roles without a rule are cleared.
pub fn apply_role_flags(roles: &mut [Capability], title: &str) {
    let title = title.trim();
    for role in roles {
        role.value = (role.name == MANAGER_ROLE && title == SUPERVISOR_TITLE)
            || (role.name == AGENT_ROLE && title == AGENT_TITLE);
    }
}

/// Sets a team flag iff the team is in `active_teams`.
pub fn apply_team_flags(teams: &mut [Capability], active_teams: &BTreeSet<String>) {
    for team in teams {
        team.value = active_teams.contains(&team.name);
    }
}

/// Moves every record to `team` alone. Returns how many records carry that team entry.
pub fn assign_single_team(records: &mut [UserRecord], team: &str) -> Result<usize, SyncError> {
    let known = records
        .iter()
        .filter(|r| r.teams.iter().any(|t| t.name == team))
        .count();
    if known == 0 {
        return Err(SyncError::UnknownTeam(team.to_string()));
    }

    let only = BTreeSet::from([team.to_string()]);
    for record in records.iter_mut() {
        apply_team_flags(&mut record.teams, &only);
    }
    Ok(known)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample_template;

    fn roles() -> Vec<Capability> {
        vec![
            Capability::new("Agent", false),
            Capability::new("Manager Atendente", false),
            Capability::new("Administrator", true),
        ]
    }

    fn flags(entries: &[Capability]) -> Vec<bool> {
        entries.iter().map(|c| c.value).collect()
    }

    #[test]
    fn supervisor_gets_manager_role_only() {
        let mut roles = roles();
        apply_role_flags(&mut roles, "Supervisor");
        assert_eq!(flags(&roles), vec![false, true, false]);
    }

    #[test]
    fn atendente_gets_agent_role_only() {
        let mut roles = roles();
        apply_role_flags(&mut roles, " Atendente ");
        assert_eq!(flags(&roles), vec![true, false, false]);
    }

    #[test]
    fn unknown_title_clears_every_role() {
        let mut roles = roles();
        apply_role_flags(&mut roles, "Diretor");
        assert_eq!(flags(&roles), vec![false, false, false]);
    }

    #[test]
    fn team_flags_follow_active_set() {
        let mut teams = vec![
            Capability::new("Sales", false),
            Capability::new("Support", true),
            Capability::new("Billing", true),
        ];
        let active = BTreeSet::from(["Sales".to_string(), "Ghost".to_string()]);
        apply_team_flags(&mut teams, &active);
        assert_eq!(flags(&teams), vec![true, false, false]);
        let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Sales", "Support", "Billing"]);
    }

    #[test]
    fn reapplying_flags_is_idempotent() {
        let mut record = sample_template().instantiate();
        let active = BTreeSet::from(["Support".to_string()]);

        apply_role_flags(&mut record.roles, "Supervisor");
        apply_team_flags(&mut record.teams, &active);
        let once = record.clone();

        apply_role_flags(&mut record.roles, "Supervisor");
        apply_team_flags(&mut record.teams, &active);
        assert_eq!(record, once);
    }

    #[test]
    fn assign_single_team_overrides_every_record() {
        let template = sample_template();
        let mut records = vec![template.instantiate(), template.instantiate()];
        records[0].teams[0].value = true;

        let touched = assign_single_team(&mut records, "Support").unwrap();
        assert_eq!(touched, 2);
        for record in &records {
            assert_eq!(record.active_teams().collect::<Vec<_>>(), vec!["Support"]);
        }
    }

    #[test]
    fn assign_single_team_rejects_unknown_team() {
        let mut records = vec![sample_template().instantiate()];
        let err = assign_single_team(&mut records, "Ghost").unwrap_err();
        assert!(matches!(err, SyncError::UnknownTeam(name) if name == "Ghost"));
    }
}
