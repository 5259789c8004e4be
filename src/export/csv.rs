//! CSV export of audit log records

use std::io::Write;

use crate::audit::{build_view_model, summarize_changes};
use crate::config::Settings;
use crate::error::AuditResult;
use crate::models::AuditLogRecord;

const HEADER: [&str; 11] = [
    "ID",
    "Time (UTC)",
    "Timestamp",
    "Editor Name",
    "Editor Email",
    "Event Type",
    "Action",
    "Entity Type",
    "Entity ID",
    "Shown As",
    "Changes",
];

/// Export records to CSV, one row per record
///
/// The changes column holds the full top-level change summary, untruncated.
pub fn export_records_csv<W: Write>(
    records: &[AuditLogRecord],
    settings: &Settings,
    writer: W,
) -> AuditResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    for record in records {
        let vm = build_view_model(Some(record));
        let changes = if vm.effective_is_same_data {
            String::new()
        } else {
            summarize_changes(&vm.diff_old_value, &vm.diff_new_value).unwrap_or_default()
        };

        let time = record.format_timestamp(&settings.date_format);
        let shown_as = vm.classification.to_string();
        csv_writer.write_record([
            record.id.as_str(),
            time.as_str(),
            record.timestamp.as_str(),
            record.editor.name.as_str(),
            record.editor.email.as_str(),
            record.event_type.as_str(),
            record.action_label(),
            record.entity_type.name(),
            record.entity_id.as_deref().unwrap_or_default(),
            shown_as.as_str(),
            changes.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Editor, EntityType};

    #[test]
    fn test_export_records() {
        let records = vec![AuditLogRecord {
            id: "log-1".into(),
            event_type: "FEATURE_UPDATED".into(),
            entity_data: r#"{"name":"b, c"}"#.into(),
            previous_entity_data: r#"{"name":"a"}"#.into(),
            timestamp: "0".into(),
            editor: Editor::new("Ada", "ada@example.com"),
            entity_type: EntityType::Feature,
            entity_id: None,
        }];

        let mut buffer = Vec::new();
        export_records_csv(&records, &Settings::default(), &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let mut lines = output.lines();

        assert!(lines.next().unwrap().starts_with("ID,Time (UTC),Timestamp"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("log-1,1970-01-01 00:00:00,0,Ada,ada@example.com,FEATURE_UPDATED,updated,FEATURE,,updated,"));
        // the summary contains a comma, so it's quoted
        assert!(row.ends_with("\"name: \"\"a\"\" -> \"\"b, c\"\"\""));
    }

    #[test]
    fn test_export_empty() {
        let mut buffer = Vec::new();
        export_records_csv(&[], &Settings::default(), &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 1);
    }
}
