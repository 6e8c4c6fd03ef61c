/// Tabular input: one header line and the data rows under it.
///
/// A cell is `None` when the source cell was empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Stacks several tables, aligning columns by normalized header.
    ///
    /// Headers that differ only in case or surrounding whitespace land in the
    /// same column, under the first spelling seen. Cells of columns a table
    /// does not have are `None`.
    pub fn concat(tables: impl IntoIterator<Item = Table>) -> Table {
        let mut out = Table::default();
        for table in tables {
            let positions: Vec<usize> = table
                .headers
                .iter()
                .map(|h| {
                    let key = normalize_header(h);
                    let found = out.headers.iter().position(|o| normalize_header(o) == key);
                    match found {
                        Some(pos) => pos,
                        None => {
                            out.headers.push(h.clone());
                            out.headers.len() - 1
                        }
                    }
                })
                .collect();

            for row in &mut out.rows {
                row.resize(out.headers.len(), None);
            }
            for row in table.rows {
                let mut aligned = vec![None; out.headers.len()];
                for (cell, &pos) in row.into_iter().zip(&positions) {
                    aligned[pos] = cell;
                }
                out.rows.push(aligned);
            }
        }
        out
    }
}

/// Canonical form of a header: trimmed and lowercased.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Option<String>> {
        values
            .iter()
            .map(|v| (!v.is_empty()).then(|| v.to_string()))
            .collect()
    }

    #[test]
    fn concat_aligns_columns_by_header() {
        let first = Table::new(
            vec!["Email".into(), "Nome".into()],
            vec![cells(&["a@x.com", "Ana"])],
        );
        let second = Table::new(
            vec!["Nome".into(), "Time".into(), "Email".into()],
            vec![cells(&["Bia", "Sales", "b@x.com"])],
        );

        let merged = Table::concat([first, second]);
        assert_eq!(merged.headers, vec!["Email", "Nome", "Time"]);
        assert_eq!(merged.rows[0], cells(&["a@x.com", "Ana", ""]));
        assert_eq!(merged.rows[1], cells(&["b@x.com", "Bia", "Sales"]));
    }

    #[test]
    fn concat_merges_headers_differing_in_case() {
        let first = Table::new(
            vec!["Email".into(), "Nome".into()],
            vec![cells(&["a@x.com", "Ana"])],
        );
        let second = Table::new(
            vec![" EMAIL".into(), "NOME".into()],
            vec![cells(&["b@x.com", "Bia"])],
        );

        let merged = Table::concat([first, second]);
        assert_eq!(merged.headers, vec!["Email", "Nome"]);
        assert_eq!(merged.rows[0], cells(&["a@x.com", "Ana"]));
        assert_eq!(merged.rows[1], cells(&["b@x.com", "Bia"]));
    }

    #[test]
    fn concat_of_nothing_is_empty() {
        let merged = Table::concat(Vec::new());
        assert!(merged.is_empty());
        assert!(merged.headers.is_empty());
    }
}
