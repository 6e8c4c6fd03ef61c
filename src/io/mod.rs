mod export;
mod sheet;

pub use export::{ExportField, csv_headers, load_records, save_csv, save_json, to_json, write_csv};
pub use sheet::{read_csv, read_table, read_workbook};
