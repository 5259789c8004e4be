//! Line-level diff of two entity snapshots
//!
//! Takes the `diff_old_value`/`diff_new_value` pair from the view model,
//! pretty-prints each side, and produces the rows the detail view shows.
//! The changes tab keeps only changed lines and a window of context around
//! them; the snapshot tab keeps every line.

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

use super::json::pretty_snapshot;

/// Which view of the diff to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DiffTab {
    /// Only changed lines plus context
    #[default]
    Changes,
    /// The whole document
    Snapshot,
}

impl DiffTab {
    pub fn only_changed_lines(&self) -> bool {
        matches!(self, Self::Changes)
    }
}

impl fmt::Display for DiffTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Changes => write!(f, "changes"),
            Self::Snapshot => write!(f, "snapshot"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Added,
    Removed,
    Unchanged,
}

impl LineKind {
    /// Gutter marker
    pub fn marker(&self) -> char {
        match self {
            Self::Added => '+',
            Self::Removed => '-',
            Self::Unchanged => ' ',
        }
    }
}

/// One line of the diff, with 1-based line numbers on each side
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub kind: LineKind,
    pub old_line: Option<usize>,
    pub new_line: Option<usize>,
    pub text: String,
}

impl DiffLine {
    pub fn is_change(&self) -> bool {
        self.kind != LineKind::Unchanged
    }
}

/// A rendered row: a diff line, or a gap between hunks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffRow {
    Line(DiffLine),
    /// Unchanged lines omitted from the changes tab
    Skipped(usize),
}

/// Diff two texts line by line (longest common subsequence)
///
/// The shared head and tail are matched directly, so the LCS table only
/// covers the region that actually differs.
pub fn diff_lines(old: &str, new: &str) -> Vec<DiffLine> {
    let old: Vec<&str> = if old.is_empty() { Vec::new() } else { old.lines().collect() };
    let new: Vec<&str> = if new.is_empty() { Vec::new() } else { new.lines().collect() };

    let prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let (n, m) = (old.len() - suffix, new.len() - suffix);

    let mut lines = Vec::with_capacity(old.len().max(new.len()));
    let unchanged = |i: usize, j: usize| DiffLine {
        kind: LineKind::Unchanged,
        old_line: Some(i + 1),
        new_line: Some(j + 1),
        text: old[i].to_string(),
    };

    lines.extend((0..prefix).map(|i| unchanged(i, i)));

    // lcs[i][j]: length of the LCS of old[prefix + i..n] and new[prefix + j..m]
    let (rows, cols) = (n - prefix, m - prefix);
    let mut lcs = vec![vec![0u32; cols + 1]; rows + 1];
    for i in (0..rows).rev() {
        for j in (0..cols).rev() {
            lcs[i][j] = if old[prefix + i] == new[prefix + j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < rows || j < cols {
        let (oi, nj) = (prefix + i, prefix + j);
        if i < rows && j < cols && old[oi] == new[nj] {
            lines.push(unchanged(oi, nj));
            i += 1;
            j += 1;
        } else if i < rows && (j == cols || lcs[i + 1][j] >= lcs[i][j + 1]) {
            lines.push(DiffLine {
                kind: LineKind::Removed,
                old_line: Some(oi + 1),
                new_line: None,
                text: old[oi].to_string(),
            });
            i += 1;
        } else {
            lines.push(DiffLine {
                kind: LineKind::Added,
                old_line: None,
                new_line: Some(nj + 1),
                text: new[nj].to_string(),
            });
            j += 1;
        }
    }

    lines.extend((0..suffix).map(|k| unchanged(n + k, m + k)));
    lines
}

/// Render the diff of two snapshot texts for the given tab
///
/// Each side is pretty-printed first; an empty or malformed side renders as
/// an empty document. `context` is the number of unchanged lines kept on
/// either side of a change in the changes tab.
pub fn render_diff(old_value: &str, new_value: &str, tab: DiffTab, context: usize) -> Vec<DiffRow> {
    let old = pretty_snapshot(old_value).unwrap_or_default();
    let new = pretty_snapshot(new_value).unwrap_or_default();
    let lines = diff_lines(&old, &new);

    if !tab.only_changed_lines() {
        return lines.into_iter().map(DiffRow::Line).collect();
    }

    let mut keep = vec![false; lines.len()];
    for (idx, line) in lines.iter().enumerate() {
        if line.is_change() {
            let start = idx.saturating_sub(context);
            let end = (idx + context).min(lines.len().saturating_sub(1));
            keep[start..=end].iter_mut().for_each(|k| *k = true);
        }
    }

    let mut rows = Vec::new();
    let mut skipped = 0;
    for (line, kept) in lines.into_iter().zip(keep) {
        if kept {
            if skipped > 0 {
                rows.push(DiffRow::Skipped(skipped));
                skipped = 0;
            }
            rows.push(DiffRow::Line(line));
        } else {
            skipped += 1;
        }
    }
    // Trailing gap is only worth marking if something was shown
    if skipped > 0 && !rows.is_empty() {
        rows.push(DiffRow::Skipped(skipped));
    }

    rows
}
