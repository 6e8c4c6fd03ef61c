//! Registro de usuário e template de saída.
//!
//! O [`Template`] é carregado uma única vez, validado, e a partir dele cada
//! linha da planilha recebe um [`UserRecord`] novo via [`Template::instantiate`].

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::codec;
use crate::error::SyncError;

/// A named capability (role or team) with its membership flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    pub name: String,
    #[serde(default, with = "codec::flag_int")]
    pub value: bool,
}

impl Capability {
    pub fn new(name: impl Into<String>, value: bool) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// One platform user, in the shape the import endpoint expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default, with = "codec::text")]
    pub email: String,
    #[serde(default, with = "codec::text")]
    pub new_email: String,
    #[serde(default, with = "codec::opt_text")]
    pub agent_number: Option<String>,
    #[serde(default, with = "codec::text")]
    pub first_name: String,
    #[serde(default, with = "codec::text")]
    pub last_name: String,
    #[serde(default, with = "codec::text")]
    pub alias: String,
    #[serde(default, with = "codec::opt_text")]
    pub status: Option<String>,
    #[serde(default, with = "codec::text")]
    pub location: String,
    #[serde(default, with = "codec::text")]
    pub max_chat_limit: String,
    #[serde(default, with = "codec::flag_text")]
    pub max_chat_limit_enabled: bool,
    #[serde(default, with = "codec::flag_text")]
    pub unrestricted_international_calling: bool,
    #[serde(default, with = "codec::flag_text")]
    pub external_user: bool,
    #[serde(default, with = "codec::opt_text")]
    pub ucaas_sip_uri: Option<String>,
    #[serde(default, with = "codec::opt_text")]
    pub ucaas_user_name: Option<String>,
    #[serde(default, with = "codec::text")]
    pub extension_number: String,
    #[serde(default, with = "codec::opt_text")]
    pub availability_filter: Option<String>,
    #[serde(default, with = "codec::opt_text")]
    pub direct_inbound_number1: Option<String>,
    #[serde(default, with = "codec::opt_text")]
    pub direct_inbound_number2: Option<String>,
    #[serde(default, with = "codec::opt_text")]
    pub direct_inbound_number3: Option<String>,
    #[serde(default, with = "codec::opt_text")]
    pub direct_inbound_number4: Option<String>,
    #[serde(default, with = "codec::opt_text")]
    pub direct_inbound_number5: Option<String>,
    #[serde(default, deserialize_with = "codec::nullable_list::deserialize")]
    pub roles: Vec<Capability>,
    #[serde(default, deserialize_with = "codec::nullable_list::deserialize")]
    pub teams: Vec<Capability>,
    /// Fields the platform sends that this tool does not interpret.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
    /// Whether the identity was absent from the directory. Never persisted.
    #[serde(skip)]
    pub is_new: bool,
}

impl UserRecord {
    /// Names of the teams whose flag is set.
    pub fn active_teams(&self) -> impl Iterator<Item = &str> {
        self.teams
            .iter()
            .filter(|t| t.value)
            .map(|t| t.name.as_str())
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Validated, immutable master copy of the output record shape.
#[derive(Debug, Clone)]
pub struct Template {
    defaults: UserRecord,
}

impl Template {
    /// Builds a template from already-parsed record defaults, validating its shape.
    pub fn new(defaults: UserRecord) -> Result<Self, SyncError> {
        validate_entries("roles", &defaults.roles)?;
        validate_entries("teams", &defaults.teams)?;
        Ok(Self { defaults })
    }

    /// Parses the template endpoint payload: a record object, or an array
    /// whose first element is the record.
    pub fn from_json(json: &str) -> Result<Self, SyncError> {
        let value: Value = serde_json::from_str(json)?;
        let object = match value {
            Value::Array(items) => items
                .into_iter()
                .next()
                .ok_or_else(|| SyncError::Template("template array is empty".into()))?,
            obj @ Value::Object(_) => obj,
            other => {
                return Err(SyncError::Template(format!(
                    "expected an object or an array, found {other}"
                )));
            }
        };
        if !object.is_object() {
            return Err(SyncError::Template(
                "first template element is not an object".into(),
            ));
        }
        Self::new(serde_json::from_value(object)?)
    }

    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// A fresh record carrying the template defaults.
    pub fn instantiate(&self) -> UserRecord {
        self.defaults.clone()
    }

    pub fn roles(&self) -> &[Capability] {
        &self.defaults.roles
    }

    pub fn teams(&self) -> &[Capability] {
        &self.defaults.teams
    }

    /// Whether the template has a team entry with this exact name.
    pub fn knows_team(&self, name: &str) -> bool {
        self.defaults.teams.iter().any(|t| t.name == name)
    }
}

fn validate_entries(list: &str, entries: &[Capability]) -> Result<(), SyncError> {
    let mut seen = HashSet::new();
    for entry in entries {
        if entry.name.trim().is_empty() {
            return Err(SyncError::Template(format!(
                "{list} contains an entry without a name"
            )));
        }
        if !seen.insert(entry.name.as_str()) {
            return Err(SyncError::Template(format!(
                "{list} contains '{}' more than once",
                entry.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const TEMPLATE_JSON: &str = r#"[{
        "email": "",
        "new_email": "",
        "agent_number": null,
        "first_name": "",
        "last_name": "",
        "alias": "",
        "status": "Active",
        "location": "",
        "max_chat_limit": "",
        "max_chat_limit_enabled": "0",
        "unrestricted_international_calling": "0",
        "external_user": "0",
        "extension_number": "",
        "timezone": "America/Sao_Paulo",
        "roles": [
            {"name": "Agent", "value": 0},
            {"name": "Manager Atendente", "value": 0},
            {"name": "Administrator", "value": 1}
        ],
        "teams": [
            {"name": "Sales", "value": 0},
            {"name": "Support", "value": 0},
            {"name": "Billing", "value": 1}
        ]
    }]"#;

    pub(crate) fn sample_template() -> Template {
        Template::from_json(TEMPLATE_JSON).unwrap()
    }

    #[test]
    fn loads_first_element_of_array() {
        let template = sample_template();
        assert_eq!(template.roles().len(), 3);
        assert_eq!(template.teams()[2], Capability::new("Billing", true));
        assert!(template.knows_team("Support"));
        assert!(!template.knows_team("support"));
    }

    #[test]
    fn instantiate_returns_independent_copies() {
        let template = sample_template();
        let mut first = template.instantiate();
        first.teams[0].value = true;
        first.email = "a@x.com".into();

        let second = template.instantiate();
        assert!(!second.teams[0].value);
        assert_eq!(second.email, "");
    }

    #[test]
    fn preserves_unknown_fields_and_drops_is_new() {
        let mut record = sample_template().instantiate();
        record.is_new = true;
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["timezone"], "America/Sao_Paulo");
        assert!(json.get("is_new").is_none());
        assert_eq!(json["roles"][2]["value"], 1);
        assert_eq!(json["max_chat_limit_enabled"], "0");
    }

    #[test]
    fn null_role_list_is_empty() {
        let template = Template::from_json(r#"{"email": "", "roles": null}"#).unwrap();
        assert!(template.roles().is_empty());
        assert!(template.teams().is_empty());
    }

    #[test]
    fn rejects_duplicate_team_names() {
        let err = Template::from_json(
            r#"{"teams": [{"name": "Sales", "value": 0}, {"name": "Sales", "value": 1}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SyncError::Template(_)));
    }

    #[test]
    fn rejects_blank_role_name() {
        let err = Template::from_json(r#"{"roles": [{"name": "  ", "value": 0}]}"#).unwrap_err();
        assert!(matches!(err, SyncError::Template(_)));
    }

    #[test]
    fn rejects_empty_array() {
        assert!(matches!(
            Template::from_json("[]"),
            Err(SyncError::Template(_))
        ));
    }
}
