//! Audit log display formatting
//!
//! Formats audit log pages as tables and single records as a detail view
//! with attribution, action label, and the snapshot diff.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::audit::{
    build_view_model, detailed_changes, render_diff, summarize_changes, AuditLogViewModel,
    Classification, DiffRow, DiffTab,
};
use crate::config::Settings;
use crate::models::AuditLogRecord;
use crate::query::AuditLogPage;

/// Longest change summary shown in the list view
const SUMMARY_WIDTH: usize = 60;

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Time (UTC)")]
    time: String,
    #[tabled(rename = "Editor")]
    editor: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Entity")]
    entity: String,
    #[tabled(rename = "Changes")]
    changes: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// One-line description of what changed, for list views
pub fn change_summary(vm: &AuditLogViewModel) -> String {
    if !vm.has_displayable_data {
        return "-".to_string();
    }
    if vm.effective_is_same_data {
        return "(no changes)".to_string();
    }
    let summary = summarize_changes(&vm.diff_old_value, &vm.diff_new_value)
        .unwrap_or_else(|| "-".to_string());
    truncate(&summary, SUMMARY_WIDTH)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let head: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

/// Format a page of records as a table
pub fn format_record_list(page: &AuditLogPage, settings: &Settings) -> String {
    if page.records.is_empty() {
        return if page.total_count == 0 {
            "No audit logs found.".to_string()
        } else {
            format!(
                "No audit logs on page {} ({} records in total).",
                page.page, page.total_count
            )
        };
    }

    let rows: Vec<RecordRow> = page
        .records
        .iter()
        .map(|record| {
            let vm = build_view_model(Some(record));
            RecordRow {
                time: record.format_timestamp(&settings.date_format),
                editor: record.editor.display_name().to_string(),
                action: record.action_label().to_string(),
                entity: record.entity_type.to_string(),
                changes: change_summary(&vm),
                id: record.id.clone(),
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());

    let mut output = table.to_string();
    output.push('\n');
    output.push_str(&format!(
        "Page {}: showing {} of {} records",
        page.page,
        page.records.len(),
        page.total_count
    ));
    if let Some(next) = page.next_page {
        output.push_str(&format!(" (next: --page {})", next));
    }
    output.push('\n');
    output
}

/// Format diff rows with a line-number gutter
pub fn format_diff_rows(rows: &[DiffRow]) -> String {
    let mut output = String::new();
    for row in rows {
        match row {
            DiffRow::Line(line) => {
                let old = line.old_line.map(|n| n.to_string()).unwrap_or_default();
                let new = line.new_line.map(|n| n.to_string()).unwrap_or_default();
                output.push_str(&format!(
                    "{:>4} {:>4} {} {}\n",
                    old,
                    new,
                    line.kind.marker(),
                    line.text
                ));
            }
            DiffRow::Skipped(count) => {
                output.push_str(&format!("          @@ {} unchanged lines @@\n", count));
            }
        }
    }
    output
}

/// Format a single record's details
///
/// `tab` is ignored when the record has no changes to toggle between.
pub fn format_record_details(
    record: &AuditLogRecord,
    tab: DiffTab,
    show_fields: bool,
    settings: &Settings,
) -> String {
    let vm = build_view_model(Some(record));
    let mut output = String::new();

    output.push_str(&format!(
        "{} {} a {}\n",
        record.editor.display_name(),
        record.action_label(),
        record.entity_type
    ));
    output.push_str(&format!("  ID:          {}\n", record.id));
    output.push_str(&format!("  Event:       {}\n", record.event_type));
    if let Some(entity_id) = &record.entity_id {
        output.push_str(&format!("  Entity ID:   {}\n", entity_id));
    }
    output.push_str(&format!(
        "  Time (UTC):  {}\n",
        record.format_timestamp(&settings.date_format)
    ));
    if !record.editor.email.is_empty() {
        output.push_str(&format!("  Editor:      {}\n", record.editor.email));
    }
    output.push_str(&format!("  Shown as:    {}\n", vm.classification));
    output.push('\n');

    if !vm.has_displayable_data {
        output.push_str("No entity data recorded for this event.\n");
        return output;
    }

    if vm.classification == Classification::CurrentVersion {
        output.push_str("No changes. Current version:\n");
        let rows = render_diff(&vm.diff_old_value, &vm.diff_new_value, DiffTab::Snapshot, 0);
        output.push_str(&format_diff_rows(&rows));
        return output;
    }

    let tab = if vm.should_show_changes_tabs {
        tab
    } else {
        DiffTab::Snapshot
    };
    output.push_str(&format!("[{}]\n", tab));
    let rows = render_diff(
        &vm.diff_old_value,
        &vm.diff_new_value,
        tab,
        settings.diff_context_lines,
    );
    output.push_str(&format_diff_rows(&rows));

    if show_fields {
        let changes = detailed_changes(&vm.diff_old_value, &vm.diff_new_value);
        if !changes.is_empty() {
            output.push('\n');
            output.push_str("Changed fields:\n");
            for change in changes {
                output.push_str(&format!("  {}\n", change));
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Editor, EntityType};

    fn record(event_type: &str, previous: &str, entity: &str) -> AuditLogRecord {
        AuditLogRecord {
            id: "log-1".into(),
            event_type: event_type.into(),
            entity_data: entity.into(),
            previous_entity_data: previous.into(),
            timestamp: "0".into(),
            editor: Editor::new("Ada", "ada@example.com"),
            entity_type: EntityType::Feature,
            entity_id: Some("flag-a".into()),
        }
    }

    #[test]
    fn test_change_summary() {
        let updated = record("FEATURE_UPDATED", r#"{"enabled":false}"#, r#"{"enabled":true}"#);
        assert_eq!(
            change_summary(&build_view_model(Some(&updated))),
            "enabled: false -> true"
        );

        let archived = record("FEATURE_ARCHIVED", r#"{"a":1}"#, r#"{"a":1}"#);
        assert_eq!(
            change_summary(&build_view_model(Some(&archived))),
            "(no changes)"
        );

        let empty = record("FEATURE_RENAMED", "", "");
        assert_eq!(change_summary(&build_view_model(Some(&empty))), "-");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }

    #[test]
    fn test_record_list() {
        let page = AuditLogPage {
            records: vec![record("FEATURE_CREATED", "", r#"{"id":"flag-a"}"#)],
            page: 1,
            next_page: Some(2),
            total_count: 7,
        };
        let output = format_record_list(&page, &Settings::default());

        assert!(output.contains("1970-01-01 00:00:00"));
        assert!(output.contains("created"));
        assert!(output.contains("Feature Flag"));
        assert!(output.contains("showing 1 of 7 records"));
        assert!(output.contains("--page 2"));
    }

    #[test]
    fn test_empty_list() {
        let page = AuditLogPage {
            records: vec![],
            page: 1,
            next_page: None,
            total_count: 0,
        };
        assert_eq!(
            format_record_list(&page, &Settings::default()),
            "No audit logs found."
        );
    }

    #[test]
    fn test_details_for_deletion() {
        let deleted = record("FEATURE_DELETED", r#"{"id":"flag-a"}"#, "");
        let output = format_record_details(&deleted, DiffTab::Changes, false, &Settings::default());

        assert!(output.starts_with("Ada deleted a Feature Flag"));
        assert!(output.contains("Shown as:    deleted"));
        assert!(output.contains("-   \"id\": \"flag-a\""));
    }

    #[test]
    fn test_details_for_current_version() {
        let enabled = record("FEATURE_ENABLED", r#"{"a":1}"#, r#"{"a":1}"#);
        let output = format_record_details(&enabled, DiffTab::Changes, false, &Settings::default());

        assert!(output.contains("No changes. Current version:"));
        assert!(!output.contains("[changes]"));
    }

    #[test]
    fn test_details_with_fields() {
        let updated = record(
            "FEATURE_UPDATED",
            r#"{"rules":{"default":"a"}}"#,
            r#"{"rules":{"default":"b"}}"#,
        );
        let output = format_record_details(&updated, DiffTab::Changes, true, &Settings::default());

        assert!(output.contains("[changes]"));
        assert!(output.contains("rules.default: \"a\" -> \"b\""));
    }

    #[test]
    fn test_details_without_data() {
        let bare = record("FEATURE_RENAMED", "", "{broken");
        let output = format_record_details(&bare, DiffTab::Changes, false, &Settings::default());
        assert!(output.contains("No entity data recorded"));
    }

    #[test]
    fn test_diff_row_gutter() {
        let rows = render_diff("", r#"{"a":1}"#, DiffTab::Snapshot, 0);
        let output = format_diff_rows(&rows);
        assert!(output.lines().all(|l| l.contains(" + ")));
    }
}
