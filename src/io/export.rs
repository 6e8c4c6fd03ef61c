//! JSON and CSV exports of finished records.
//!
//! The CSV layout is the platform's bulk-import sheet: a fixed run of scalar
//! columns ([`ExportField::ALL`]) followed by one `Role: <name>` and one
//! `Team: <name>` column per template entry.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::SyncError;
use crate::model::{Capability, Template, UserRecord};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A scalar column of the CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportField {
    Email,
    NewEmail,
    AgentId,
    FirstName,
    LastName,
    Alias,
    Status,
    Location,
    ChatConcurrency,
    ChatConcurrencyStatus,
    InternationalCalling,
    ExternalUser,
    ExternalSipUri,
    UcaasUsername,
    Extension,
    AvailabilityFilter,
    DirectInbound1,
    DirectInbound2,
    DirectInbound3,
    DirectInbound4,
    DirectInbound5,
}

impl ExportField {
    /// Column order of the export.
    pub const ALL: [ExportField; 21] = [
        ExportField::Email,
        ExportField::NewEmail,
        ExportField::AgentId,
        ExportField::FirstName,
        ExportField::LastName,
        ExportField::Alias,
        ExportField::Status,
        ExportField::Location,
        ExportField::ChatConcurrency,
        ExportField::ChatConcurrencyStatus,
        ExportField::InternationalCalling,
        ExportField::ExternalUser,
        ExportField::ExternalSipUri,
        ExportField::UcaasUsername,
        ExportField::Extension,
        ExportField::AvailabilityFilter,
        ExportField::DirectInbound1,
        ExportField::DirectInbound2,
        ExportField::DirectInbound3,
        ExportField::DirectInbound4,
        ExportField::DirectInbound5,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExportField::Email => "Email",
            ExportField::NewEmail => "New email",
            ExportField::AgentId => "Agent ID",
            ExportField::FirstName => "First name",
            ExportField::LastName => "Last name",
            ExportField::Alias => "Alias",
            ExportField::Status => "Status",
            ExportField::Location => "Location",
            ExportField::ChatConcurrency => "Chat concurrency",
            ExportField::ChatConcurrencyStatus => "Chat concurrency status",
            ExportField::InternationalCalling => "Non-restricted international calling",
            ExportField::ExternalUser => "External User",
            ExportField::ExternalSipUri => "External SIP URI",
            ExportField::UcaasUsername => "UCaaS username",
            ExportField::Extension => "Agent Extensions",
            ExportField::AvailabilityFilter => "Availability Filter Name",
            ExportField::DirectInbound1 => "Direct Inbound Number: 1",
            ExportField::DirectInbound2 => "Direct Inbound Number: 2",
            ExportField::DirectInbound3 => "Direct Inbound Number: 3",
            ExportField::DirectInbound4 => "Direct Inbound Number: 4",
            ExportField::DirectInbound5 => "Direct Inbound Number: 5",
        }
    }

    pub fn value(self, record: &UserRecord) -> String {
        let optional = |v: &Option<String>| v.clone().unwrap_or_default();
        match self {
            ExportField::Email => record.email.clone(),
            ExportField::NewEmail => record.new_email.clone(),
            ExportField::AgentId => optional(&record.agent_number),
            ExportField::FirstName => record.first_name.clone(),
            ExportField::LastName => record.last_name.clone(),
            ExportField::Alias => record.alias.clone(),
            ExportField::Status => optional(&record.status),
            ExportField::Location => record.location.clone(),
            ExportField::ChatConcurrency => record.max_chat_limit.clone(),
            ExportField::ChatConcurrencyStatus => flag(record.max_chat_limit_enabled),
            ExportField::InternationalCalling => flag(record.unrestricted_international_calling),
            ExportField::ExternalUser => flag(record.external_user),
            ExportField::ExternalSipUri => optional(&record.ucaas_sip_uri),
            ExportField::UcaasUsername => optional(&record.ucaas_user_name),
            ExportField::Extension => record.extension_number.clone(),
            ExportField::AvailabilityFilter => optional(&record.availability_filter),
            ExportField::DirectInbound1 => optional(&record.direct_inbound_number1),
            ExportField::DirectInbound2 => optional(&record.direct_inbound_number2),
            ExportField::DirectInbound3 => optional(&record.direct_inbound_number3),
            ExportField::DirectInbound4 => optional(&record.direct_inbound_number4),
            ExportField::DirectInbound5 => optional(&record.direct_inbound_number5),
        }
    }
}

fn flag(value: bool) -> String {
    let digit = if value { "1" } else { "0" };
    digit.to_string()
}

/// Header line of the CSV export for `template`.
pub fn csv_headers(template: &Template) -> Vec<String> {
    ExportField::ALL
        .iter()
        .map(|f| f.label().to_string())
        .chain(template.roles().iter().map(|r| format!("Role: {}", r.name)))
        .chain(template.teams().iter().map(|t| format!("Team: {}", t.name)))
        .collect()
}

fn csv_row(template: &Template, record: &UserRecord) -> Vec<String> {
    ExportField::ALL
        .iter()
        .map(|f| f.value(record))
        .chain(template.roles().iter().map(|r| membership(&record.roles, &r.name)))
        .chain(template.teams().iter().map(|t| membership(&record.teams, &t.name)))
        .collect()
}

fn membership(entries: &[Capability], name: &str) -> String {
    flag(entries.iter().any(|e| e.name == name && e.value))
}

/// Writes the CSV export, UTF-8 with a byte order mark.
pub fn write_csv<W: Write>(
    mut writer: W,
    template: &Template,
    records: &[UserRecord],
    delimiter: u8,
) -> Result<(), SyncError> {
    writer.write_all(UTF8_BOM)?;
    let mut csv = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    csv.write_record(csv_headers(template))?;
    for record in records {
        csv.write_record(csv_row(template, record))?;
    }
    csv.flush()?;
    Ok(())
}

pub fn save_csv(
    path: &Path,
    template: &Template,
    records: &[UserRecord],
    delimiter: u8,
) -> Result<(), SyncError> {
    let file = BufWriter::new(File::create(path)?);
    write_csv(file, template, records, delimiter)
}

/// Pretty JSON with four-space indentation. `is_new` is never written.
pub fn to_json(records: &[UserRecord]) -> Result<String, SyncError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser)?;
    // serde_json only ever emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn save_json(path: &Path, records: &[UserRecord]) -> Result<(), SyncError> {
    std::fs::write(path, to_json(records)?)?;
    Ok(())
}

/// Reads back a JSON export.
pub fn load_records(path: &Path) -> Result<Vec<UserRecord>, SyncError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
