//! Reconciliation rows and their rendering

use indexmap::IndexMap;
use serde::Serialize;

use crate::version::compare::is_outdated;
use crate::version::constraint::{ConstraintStatus, NOT_AVAILABLE, analyze_constraint};

const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Whether the installed version lags behind the latest release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InstallStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "UPDATE")]
    Update,
}

impl InstallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallStatus::Ok => "OK",
            InstallStatus::Update => "UPDATE",
        }
    }
}

/// Outcome for a single package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationRow {
    pub package: String,
    pub installed: Option<String>,
    pub latest: Option<String>,
    #[serde(rename = "status")]
    pub install_status: InstallStatus,
    pub constraint: Option<String>,
    pub constraint_status: ConstraintStatus,
    pub suggested: Option<String>,
}

impl ReconciliationRow {
    /// Compare one package's declared, installed and latest versions
    pub fn new(
        package: &str,
        constraint: Option<&str>,
        installed: Option<&str>,
        latest: Option<&str>,
    ) -> Self {
        let install_status = match (installed, latest) {
            (Some(installed), Some(latest)) if is_outdated(installed, latest) => {
                InstallStatus::Update
            }
            _ => InstallStatus::Ok,
        };

        let analysis = analyze_constraint(constraint.unwrap_or(NOT_AVAILABLE), latest);

        Self {
            package: package.to_string(),
            installed: installed.map(str::to_string),
            latest: latest.map(str::to_string),
            install_status,
            constraint: constraint.map(str::to_string),
            constraint_status: analysis.status(),
            suggested: analysis.suggestion().map(str::to_string),
        }
    }
}

/// "1 constraint" / "N constraints"
pub fn constraint_count(n: usize) -> String {
    match n {
        1 => "1 constraint".to_string(),
        n => format!("{n} constraints"),
    }
}

/// All rows of one check run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub rows: Vec<ReconciliationRow>,
}

impl Report {
    pub fn new(rows: Vec<ReconciliationRow>) -> Self {
        Self { rows }
    }

    /// Number of packages whose installed version is behind
    pub fn updates_available(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.install_status == InstallStatus::Update)
            .count()
    }

    /// Number of packages whose constraint is stale or needs review
    pub fn constraint_issues(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.constraint_status != ConstraintStatus::Ok)
            .count()
    }

    /// Suggested constraints that can be written back safely
    pub fn rewrites(&self) -> IndexMap<String, String> {
        self.rows
            .iter()
            .filter_map(|row| Some((row.package.clone(), row.suggested.clone()?)))
            .collect()
    }

    /// Packages whose constraint must be updated by hand
    pub fn needs_review(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.constraint_status == ConstraintStatus::NeedsReview)
            .map(|row| row.package.as_str())
            .collect()
    }

    /// Process exit code: 1 when any installed package is behind
    pub fn exit_code(&self) -> u8 {
        if self.updates_available() > 0 { 1 } else { 0 }
    }

    /// Rows as a pretty-printed JSON array
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.rows)
    }

    /// Rows as a bordered text table; `color` highlights the status column
    pub fn to_table(&self, color: bool) -> String {
        const HEADERS: [&str; 6] = [
            "Package",
            "Installed",
            "Latest",
            "Status",
            "Constraint",
            "Suggested",
        ];

        let cells: Vec<[&str; 6]> = self
            .rows
            .iter()
            .map(|row| {
                [
                    row.package.as_str(),
                    row.installed.as_deref().unwrap_or(NOT_AVAILABLE),
                    row.latest.as_deref().unwrap_or(NOT_AVAILABLE),
                    row.install_status.as_str(),
                    row.constraint.as_deref().unwrap_or(NOT_AVAILABLE),
                    row.suggested
                        .as_deref()
                        .unwrap_or(match row.constraint_status {
                            ConstraintStatus::NeedsReview => "(review)",
                            _ => "",
                        }),
                ]
            })
            .collect();

        let widths: Vec<usize> = (0..HEADERS.len())
            .map(|col| {
                cells
                    .iter()
                    .map(|row| row[col].chars().count())
                    .chain([HEADERS[col].len()])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let border = widths
            .iter()
            .map(|width| "-".repeat(width + 2))
            .collect::<Vec<_>>()
            .join("+");
        let border = format!("+{border}+");

        let line = |values: &[&str; 6], status_color: Option<&str>| {
            let columns = values
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(col, (value, &width))| {
                    let padded = format!("{value:<width$}");
                    match status_color {
                        Some(code) if col == 3 => format!(" {code}{padded}{RESET} "),
                        _ => format!(" {padded} "),
                    }
                })
                .collect::<Vec<_>>()
                .join("|");
            format!("|{columns}|")
        };

        let mut out = vec![border.clone(), line(&HEADERS, None), border.clone()];
        for (row, values) in self.rows.iter().zip(&cells) {
            let status_color = color.then_some(match row.install_status {
                InstallStatus::Update => YELLOW,
                InstallStatus::Ok => GREEN,
            });
            out.push(line(values, status_color));
        }
        out.push(border);
        out.join("\n")
    }

    /// Human-readable summary lines printed after the table
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();

        match self.updates_available() {
            0 => lines.push("All packages are up to date!".to_string()),
            1 => lines.push("1 update available.".to_string()),
            n => lines.push(format!("{n} updates available.")),
        }

        match self.constraint_issues() {
            0 => {}
            1 => lines.push("1 constraint is behind the latest release.".to_string()),
            n => lines.push(format!("{n} constraints are behind the latest release.")),
        }

        match self.rewrites().len() {
            0 => {}
            n => lines.push(format!("{} can be updated.", constraint_count(n))),
        }

        let review = self.needs_review();
        match review.len() {
            0 => {}
            1 => lines.push(format!("1 constraint needs manual review: {}", review[0])),
            n => lines.push(format!(
                "{n} constraints need manual review: {}",
                review.join(", ")
            )),
        }

        lines
    }
}
