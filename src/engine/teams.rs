use std::collections::{BTreeSet, HashMap};

/// Team name to numeric team id.
///
/// Only teams listed here can govern an extension prefix.
#[derive(Debug, Clone, Default)]
pub struct TeamRegistry {
    ids: HashMap<String, u64>,
}

/// The team whose id prefixes a row's extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTeam {
    pub name: String,
    pub id: u64,
}

impl ResolvedTeam {
    /// The id rendered as the extension prefix.
    pub fn prefix(&self) -> String {
        self.id.to_string()
    }
}

impl TeamRegistry {
    pub fn insert(&mut self, name: &str, id: u64) {
        self.ids.insert(name.to_string(), id);
    }

    pub fn id_of(&self, name: &str) -> Option<u64> {
        self.ids.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Picks the registered active team with the highest id.
    ///
    /// Equal ids go to the lexicographically smallest name. `None` when no
    /// active team is registered.
    pub fn resolve(&self, active_teams: &BTreeSet<String>) -> Option<ResolvedTeam> {
        let mut best: Option<ResolvedTeam> = None;
        // Names arrive in ascending order; a strict comparison keeps the smallest on ties.
        for name in active_teams {
            let Some(id) = self.id_of(name) else {
                continue;
            };
            if best.as_ref().is_none_or(|b| id > b.id) {
                best = Some(ResolvedTeam {
                    name: name.clone(),
                    id,
                });
            }
        }
        best
    }
}

impl FromIterator<(String, u64)> for TeamRegistry {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TeamRegistry {
        [
            ("Sales".to_string(), 12),
            ("Support".to_string(), 31),
            ("Billing".to_string(), 31),
            ("Ops".to_string(), 5),
        ]
        .into_iter()
        .collect()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn picks_highest_id() {
        let resolved = registry().resolve(&set(&["Sales", "Ops"])).unwrap();
        assert_eq!(resolved, ResolvedTeam { name: "Sales".into(), id: 12 });
        assert_eq!(resolved.prefix(), "12");
    }

    #[test]
    fn ignores_unregistered_teams() {
        let resolved = registry().resolve(&set(&["Ghost", "Ops"])).unwrap();
        assert_eq!(resolved.name, "Ops");
    }

    #[test]
    fn ties_go_to_smallest_name() {
        let resolved = registry()
            .resolve(&set(&["Support", "Billing", "Sales"]))
            .unwrap();
        assert_eq!(resolved, ResolvedTeam { name: "Billing".into(), id: 31 });
    }

    #[test]
    fn nothing_registered_resolves_to_none() {
        assert_eq!(registry().resolve(&set(&["Ghost"])), None);
        assert_eq!(registry().resolve(&BTreeSet::new()), None);
    }
}
