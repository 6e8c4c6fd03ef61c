use std::collections::HashMap;

use crate::error::SyncError;
use crate::model::normalize_header;

pub const EMAIL: &str = "email";
pub const FIRST_NAME: &str = "nome";
pub const SURNAME: &str = "sobrenome";
pub const TITLE: &str = "cargo";
pub const TEAM: &str = "time";
pub const AGENT_NUMBER: &str = "matricula";
pub const CHAT_LIMIT: &str = "limite de chats";

/// Logical columns that every import must carry. Their cells may still be blank.
///
/// Only [`CHAT_LIMIT`] may be missing from the header.
pub const REQUIRED_COLUMNS: &[&str] = &[EMAIL, FIRST_NAME, SURNAME, TITLE, TEAM, AGENT_NUMBER];

/// Case- and whitespace-insensitive view over a table's headers.
///
/// Built once per batch; every row of the batch resolves the same logical
/// field to the same column.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    index: HashMap<String, usize>,
}

impl ColumnMap {
    /// Maps the headers and checks that each of `required` is present.
    ///
    /// When two headers normalize to the same name the last one wins.
    pub fn resolve<S: AsRef<str>>(headers: &[S], required: &[&str]) -> Result<Self, SyncError> {
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(pos, header)| (normalize_header(header.as_ref()), pos))
            .collect();

        if let Some(missing) = required
            .iter()
            .find(|c| !index.contains_key(&normalize_header(c)))
        {
            return Err(SyncError::schema(*missing));
        }

        Ok(Self { index })
    }

    /// The row's value under `field`.
    ///
    /// `None` for an empty cell or an absent optional column.
    pub fn get<'r>(&self, row: &'r [Option<String>], field: &str) -> Option<&'r str> {
        let pos = *self.index.get(&normalize_header(field))?;
        row.get(pos)?.as_deref()
    }

    /// Like [`get`](Self::get) but trimmed, with blank values treated as absent.
    pub fn get_trimmed<'r>(&self, row: &'r [Option<String>], field: &str) -> Option<&'r str> {
        self.get(row, field)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    pub fn has(&self, field: &str) -> bool {
        self.index.contains_key(&normalize_header(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        ["  EMAIL ", "Nome", "SOBRENOME", "Cargo", "TIME", "Matricula", "Limite de Chats"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn row(values: &[&str]) -> Vec<Option<String>> {
        values
            .iter()
            .map(|v| (!v.is_empty()).then(|| v.to_string()))
            .collect()
    }

    #[test]
    fn resolves_headers_case_insensitively() {
        let map = ColumnMap::resolve(&headers(), REQUIRED_COLUMNS).unwrap();
        let row = row(&["a@x.com", "Ana", "Lima", "", " Sales ", "77", "4"]);
        assert_eq!(map.get(&row, "Email"), Some("a@x.com"));
        assert_eq!(map.get(&row, SURNAME), Some("Lima"));
        assert_eq!(map.get(&row, CHAT_LIMIT), Some("4"));
        assert_eq!(map.get(&row, TITLE), None);
        assert_eq!(map.get_trimmed(&row, TEAM), Some("Sales"));
    }

    #[test]
    fn chat_limit_column_is_optional() {
        let headers = headers();
        let map = ColumnMap::resolve(&headers[..6], REQUIRED_COLUMNS).unwrap();
        let row = row(&["a@x.com", "Ana", "", "", "", ""]);
        assert!(!map.has(CHAT_LIMIT));
        assert!(map.has(AGENT_NUMBER));
        assert_eq!(map.get(&row, CHAT_LIMIT), None);
    }

    #[test]
    fn short_rows_read_as_absent() {
        let map = ColumnMap::resolve(&headers(), REQUIRED_COLUMNS).unwrap();
        let row = row(&["a@x.com"]);
        assert_eq!(map.get(&row, CHAT_LIMIT), None);
    }

    #[test]
    fn missing_required_column_is_a_schema_error() {
        let err = ColumnMap::resolve(&["Nome", "Cargo", "Time"], REQUIRED_COLUMNS).unwrap_err();
        match err {
            SyncError::Schema { column } => assert_eq!(column, EMAIL),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn surname_and_agent_number_headers_are_required() {
        let err = ColumnMap::resolve(
            &["Email", "Nome", "Cargo", "Time", "Matricula"],
            REQUIRED_COLUMNS,
        )
        .unwrap_err();
        assert!(matches!(err, SyncError::Schema { column } if column == SURNAME));

        let err = ColumnMap::resolve(
            &["Email", "Nome", "Sobrenome", "Cargo", "Time"],
            REQUIRED_COLUMNS,
        )
        .unwrap_err();
        assert!(matches!(err, SyncError::Schema { column } if column == AGENT_NUMBER));
    }

    #[test]
    fn blank_values_are_absent_when_trimmed() {
        let map = ColumnMap::resolve(&headers(), REQUIRED_COLUMNS).unwrap();
        let row = vec![Some("   ".to_string()); 7];
        assert_eq!(map.get(&row, EMAIL), Some("   "));
        assert_eq!(map.get_trimmed(&row, EMAIL), None);
    }
}
