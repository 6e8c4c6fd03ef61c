//! Leitura de planilhas e CSV para uma [`Table`].
//!
//! Pastas de trabalho Excel são lidas com `calamine`; todas as abas são
//! concatenadas por nome de coluna. Arquivos `.csv` usam a crate `csv`.
//! Em ambos os casos as linhas acima de `header_row` são títulos e são ignoradas.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::{debug, warn};

use crate::error::SyncError;
use crate::model::Table;

/// Lê `path` escolhendo o leitor pela extensão.
pub fn read_table(path: &Path, header_row: usize) -> Result<Table, SyncError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        read_csv(path, header_row)
    } else {
        read_workbook(path, header_row)
    }
}

/// Lê todas as abas de uma pasta de trabalho e as empilha numa única tabela.
pub fn read_workbook(path: &Path, header_row: usize) -> Result<Table, SyncError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        SyncError::Spreadsheet(format!("failed to open '{}': {e}", path.display()))
    })?;

    let mut tables = Vec::new();
    for sheet_name in workbook.sheet_names() {
        let range = match workbook.worksheet_range(&sheet_name) {
            Ok(range) => range,
            Err(e) => {
                warn!(sheet = %sheet_name, error = %e, "failed to read sheet, skipping");
                continue;
            }
        };

        // The range starts at the first used cell; pad so header_row stays absolute.
        let first_row = range.start().map_or(0, |(row, _)| row as usize);
        let rows = std::iter::repeat_n(Vec::new(), first_row)
            .chain(range.rows().map(|row| row.iter().map(cell_to_text).collect()))
            .collect();

        match table_from_rows(rows, header_row) {
            Some(table) => {
                debug!(sheet = %sheet_name, rows = table.len(), "sheet loaded");
                tables.push(table);
            }
            None => debug!(sheet = %sheet_name, "sheet has no header row, skipping"),
        }
    }

    Ok(Table::concat(tables))
}

/// Lê um CSV sem cabeçalho implícito; a linha `header_row` vira o cabeçalho.
pub fn read_csv(path: &Path, header_row: usize) -> Result<Table, SyncError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                .collect::<Vec<_>>(),
        );
    }

    // Spreadsheet tools often save CSV with a UTF-8 byte order mark.
    if let Some(Some(first)) = rows.first_mut().and_then(|r| r.first_mut())
        && first.starts_with('\u{feff}')
    {
        first.remove(0);
    }

    Ok(table_from_rows(rows, header_row).unwrap_or_default())
}

/// Separa cabeçalho e dados. `None` quando a linha de cabeçalho não existe ou está vazia.
pub(crate) fn table_from_rows(rows: Vec<Vec<Option<String>>>, header_row: usize) -> Option<Table> {
    let mut rows = rows.into_iter().skip(header_row);
    let header = rows.next()?;
    if header.iter().all(Option::is_none) {
        return None;
    }

    let headers: Vec<String> = header
        .into_iter()
        .enumerate()
        .map(|(i, cell)| cell.unwrap_or_else(|| format!("Unnamed: {i}")))
        .collect();

    let width = headers.len();
    let data = rows
        .filter(|row| row.iter().any(|c| c.as_deref().is_some_and(|v| !v.trim().is_empty())))
        .map(|mut row| {
            row.resize(width, None);
            row
        })
        .collect();

    Some(Table::new(headers, data))
}

fn cell_to_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            // Whole numbers come back as floats; render them like integers.
            if f.fract() == 0.0 {
                Some(format!("{f:.0}"))
            } else {
                Some(f.to_string())
            }
        }
        other => Some(other.to_string()),
    }
}
