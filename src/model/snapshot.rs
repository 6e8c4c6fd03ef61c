//! Pre-fetched directory data: teams, their numeric ids and their assignees.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::codec;
use crate::engine::{Directory, ExtensionAllocator, TeamRegistry};
use crate::error::SyncError;

/// A platform user assigned to a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignee {
    #[serde(default, with = "codec::text")]
    pub first_name: String,
    #[serde(default, with = "codec::text")]
    pub last_name: String,
    #[serde(default, with = "codec::opt_text")]
    pub extension_number: Option<String>,
}

/// One team as returned by the teams endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSnapshot {
    #[serde(default, with = "codec::opt_id")]
    pub id: Option<u64>,
    #[serde(default, with = "codec::opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "codec::nullable_list::deserialize")]
    pub assignees: Vec<Assignee>,
}

/// The whole teams listing, handed to the engine as plain data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectorySnapshot {
    pub teams: Vec<TeamSnapshot>,
}

impl DirectorySnapshot {
    pub fn from_json(json: &str) -> Result<Self, SyncError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Team name to numeric id, for teams that carry both.
    pub fn registry(&self) -> TeamRegistry {
        let mut registry = TeamRegistry::default();
        for team in &self.teams {
            if let (Some(id), Some(name)) = (team.id, team.name.as_deref()) {
                registry.insert(name, id);
            }
        }
        registry
    }

    /// Identity lookup keyed by `"first last"`. Assignees without a first name are ignored.
    pub fn directory(&self) -> Directory {
        let mut directory = Directory::default();
        for team in &self.teams {
            let team_name = team.name.as_deref().unwrap_or_default();
            for assignee in &team.assignees {
                if assignee.first_name.is_empty() {
                    continue;
                }
                directory.insert(&assignee.first_name, &assignee.last_name, team_name);
            }
        }
        directory
    }

    /// Every extension already in use, across all teams.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.teams
            .iter()
            .flat_map(|t| t.assignees.iter())
            .filter_map(|a| a.extension_number.as_deref())
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    /// An allocator seeded with [`extensions`](Self::extensions).
    pub fn allocator(&self) -> ExtensionAllocator {
        ExtensionAllocator::seeded(self.extensions())
    }
}
