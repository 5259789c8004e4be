//! CLI commands for browsing audit logs
//!
//! Bridges clap argument parsing with the store, query, and display layers.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use tracing::{debug, info};

use crate::audit::{AuditLogStore, DiffTab};
use crate::config::{AuditPaths, Settings};
use crate::display::{format_record_details, format_record_list};
use crate::error::{AuditError, AuditResult};
use crate::export::export_records_csv;
use crate::models::{AuditLogRecord, EntityType};
use crate::query::{parse_time_bound, AuditLogQuery, SortOrder};

/// Filters shared by list and export
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Match the editor's name or email (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only this entity type (e.g. feature, goal, segment, 0-17)
    #[arg(short = 't', long)]
    pub entity_type: Option<String>,

    /// Start of the date range (YYYY-MM-DD or seconds since epoch)
    #[arg(long)]
    pub from: Option<String>,

    /// End of the date range, inclusive (YYYY-MM-DD or seconds since epoch)
    #[arg(long)]
    pub to: Option<String>,

    /// Sort order by time (defaults to the configured order)
    #[arg(short, long, value_enum)]
    pub order: Option<SortOrder>,
}

/// Pagination flags
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Records per page (0 or unset uses the configured page size)
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl FilterArgs {
    /// Build a query from the flags, filling gaps from settings
    pub fn to_query(&self, settings: &Settings) -> AuditResult<AuditLogQuery> {
        let entity_type = self
            .entity_type
            .as_deref()
            .map(|s| {
                EntityType::parse(s)
                    .ok_or_else(|| AuditError::Validation(format!("Unknown entity type: {}", s)))
            })
            .transpose()?;

        Ok(AuditLogQuery {
            page: 1,
            page_size: settings.page_size,
            order: self.order.unwrap_or(settings.default_order),
            search_keyword: self.search.clone(),
            entity_type,
            entity_id: None,
            from: self
                .from
                .as_deref()
                .map(|s| parse_time_bound(s, false))
                .transpose()?,
            to: self
                .to
                .as_deref()
                .map(|s| parse_time_bound(s, true))
                .transpose()?,
        })
    }
}

impl PageArgs {
    fn apply(&self, query: AuditLogQuery) -> AuditLogQuery {
        AuditLogQuery {
            page: self.page,
            page_size: self
                .page_size
                .filter(|&size| size > 0)
                .unwrap_or(query.page_size),
            ..query
        }
    }
}

/// Audit log subcommands
#[derive(Subcommand, Debug)]
pub enum AuditCommands {
    /// List audit logs, newest first
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        paging: PageArgs,

        /// Export the page to a CSV file instead of printing it
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show one audit log with its diff
    Show {
        /// Audit log ID
        id: String,

        /// Diff view: only changed lines, or the whole document
        #[arg(long, value_enum, default_value_t = DiffTab::Changes)]
        tab: DiffTab,

        /// Also list changed fields by path
        #[arg(long)]
        fields: bool,
    },

    /// Change history of a single entity
    History {
        /// Entity ID (e.g. a feature flag ID)
        entity_id: String,

        #[command(flatten)]
        paging: PageArgs,

        /// Sort order by time (defaults to the configured order)
        #[arg(short, long, value_enum)]
        order: Option<SortOrder>,
    },

    /// Import records from a JSON file (record array or list response)
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Export every matching record to CSV
    Export {
        /// Destination CSV file
        file: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },
}

/// Handle an audit log command
pub fn handle_audit_command(
    paths: &AuditPaths,
    settings: &Settings,
    cmd: AuditCommands,
) -> AuditResult<()> {
    let store = AuditLogStore::new(paths.audit_log_store());

    match cmd {
        AuditCommands::List {
            filter,
            paging,
            output,
        } => {
            let query = paging.apply(filter.to_query(settings)?);
            let page = query.run(store.read_all()?)?;

            if let Some(path) = output {
                write_csv(&path, &page.records, settings)?;
                println!(
                    "Exported {} audit logs to: {}",
                    page.records.len(),
                    path.display()
                );
            } else {
                println!("{}", format_record_list(&page, settings).trim_end());
            }
        }

        AuditCommands::Show { id, tab, fields } => {
            let record = store.find(&id)?;
            debug!(id = %record.id, event_type = %record.event_type, "showing audit log");
            print!("{}", format_record_details(&record, tab, fields, settings));
        }

        AuditCommands::History {
            entity_id,
            paging,
            order,
        } => {
            let query = paging.apply(AuditLogQuery {
                page_size: settings.page_size,
                order: order.unwrap_or(settings.default_order),
                entity_id: Some(entity_id.clone()),
                ..Default::default()
            });
            let page = query.run(store.read_all()?)?;

            if page.total_count == 0 {
                println!("No history found for entity: {}", entity_id);
            } else {
                println!("History of {}", entity_id);
                println!("{}", format_record_list(&page, settings).trim_end());
            }
        }

        AuditCommands::Import { file } => {
            let summary = store.import_file(&file)?;
            println!("Imported {} audit logs.", summary.imported);
            if summary.skipped_duplicates > 0 {
                println!(
                    "Skipped {} records already in the store or without an ID.",
                    summary.skipped_duplicates
                );
            }
        }

        AuditCommands::Export { file, filter } => {
            let query = AuditLogQuery {
                page_size: usize::MAX,
                ..filter.to_query(settings)?
            };
            let page = query.run(store.read_all()?)?;
            write_csv(&file, &page.records, settings)?;
            println!(
                "Exported {} audit logs to: {}",
                page.records.len(),
                file.display()
            );
        }
    }

    Ok(())
}

fn write_csv(path: &Path, records: &[AuditLogRecord], settings: &Settings) -> AuditResult<()> {
    let file = File::create(path).map_err(|e| {
        AuditError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    export_records_csv(records, settings, BufWriter::new(file))?;
    info!(count = records.len(), path = %path.display(), "exported audit logs");
    Ok(())
}
