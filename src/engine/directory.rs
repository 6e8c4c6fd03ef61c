use std::collections::{BTreeSet, HashMap};

/// Existing platform identities, keyed by `"first last"`.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    identities: HashMap<String, Vec<String>>,
}

/// Outcome of looking a row up in the [`Directory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityMatch {
    pub is_new: bool,
    /// Teams the identity belongs to, plus the row's own team.
    pub active_teams: BTreeSet<String>,
}

/// The composite name key shared by the directory and the input rows.
pub fn lookup_key(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}").trim().to_string()
}

impl Directory {
    /// Registers `team` for the identity; a blank team only registers the identity.
    pub fn insert(&mut self, first_name: &str, last_name: &str, team: &str) {
        let teams = self
            .identities
            .entry(lookup_key(first_name, last_name))
            .or_default();
        if !team.trim().is_empty() {
            teams.push(team.to_string());
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.identities.contains_key(key)
    }

    pub fn teams_of(&self, key: &str) -> Option<&[String]> {
        self.identities.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Matches a row by exact composite name.
    ///
    /// Two different people with the same name are indistinguishable here.
    pub fn match_identity(
        &self,
        first_name: &str,
        last_name: &str,
        stated_team: Option<&str>,
    ) -> IdentityMatch {
        let key = lookup_key(first_name, last_name);
        let (is_new, mut active_teams) = match self.identities.get(&key) {
            Some(teams) => (false, teams.iter().cloned().collect()),
            None => (true, BTreeSet::new()),
        };

        if let Some(team) = stated_team.map(str::trim).filter(|t| !t.is_empty()) {
            active_teams.insert(team.to_string());
        }

        IdentityMatch {
            is_new,
            active_teams,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> Directory {
        let mut directory = Directory::default();
        directory.insert("Maria Clara", "Souza", "Sales");
        directory.insert("Solo", "", "");
        directory
    }

    #[test]
    fn existing_identity_merges_directory_and_row_teams() {
        let found = directory().match_identity("Maria", "Clara Souza", Some("Support"));
        assert!(!found.is_new);
        assert_eq!(
            found.active_teams,
            BTreeSet::from(["Sales".to_string(), "Support".to_string()])
        );
    }

    #[test]
    fn new_identity_only_asserts_its_own_team() {
        let found = directory().match_identity("Ana", "Lima", Some("Support"));
        assert!(found.is_new);
        assert_eq!(found.active_teams, BTreeSet::from(["Support".to_string()]));
    }

    #[test]
    fn blank_team_adds_nothing() {
        let found = directory().match_identity("Ana", "Lima", Some("  "));
        assert!(found.active_teams.is_empty());
        let found = directory().match_identity("Ana", "Lima", None);
        assert!(found.active_teams.is_empty());
    }

    #[test]
    fn key_is_trimmed_for_single_names() {
        assert_eq!(lookup_key("Solo", ""), "Solo");
        let found = directory().match_identity("Solo", "", None);
        assert!(!found.is_new);
        assert!(found.active_teams.is_empty());
    }

    #[test]
    fn matching_leaves_directory_untouched() {
        let dir = directory();
        let _ = dir.match_identity("Maria", "Clara Souza", Some("Support"));
        assert_eq!(dir.teams_of("Maria Clara Souza"), Some(&["Sales".to_string()][..]));
        assert_eq!(dir.len(), 2);
    }
}
