//! Constraint analysis for declared Composer requirements
//!
//! Decides whether a constraint such as `^12.0` lags behind the latest
//! release and, where the shape of the constraint allows it, proposes a
//! replacement that keeps the same operator:
//! - `^1.2` -> `^<latest>`
//! - `~1.2` -> `~<latest>`
//! - `1.2.3` / `v1.2.3` -> `<latest>`
//! - anything else (ranges, `||`, `>=`, stability flags) needs manual review

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::version::compare::compare_versions;

/// Placeholder used when a constraint or version is unknown
pub const NOT_AVAILABLE: &str = "N/A";

/// First version-looking run inside a constraint
static BASE_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(\.\d+){0,3}").unwrap());

/// A constraint that is nothing but a version
static BARE_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[vV]?\d+(\.\d+){0,3}$").unwrap());

/// Status of a declared constraint relative to the latest release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConstraintStatus {
    /// Constraint already covers the latest release, or nothing can be said
    #[serde(rename = "OK")]
    Ok,
    /// Constraint is behind and can be rewritten safely
    #[serde(rename = "STALE")]
    Stale,
    /// Constraint is behind but its shape can't be rewritten automatically
    #[serde(rename = "REVIEW")]
    NeedsReview,
}

/// Result of analyzing a single constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintAnalysis {
    /// Nothing to do
    Unaffected,
    /// Constraint is stale; replace it with the contained constraint
    SafeRewrite(String),
    /// Constraint is stale but must be updated by hand
    NeedsReview,
}

impl ConstraintAnalysis {
    pub fn status(&self) -> ConstraintStatus {
        match self {
            ConstraintAnalysis::Unaffected => ConstraintStatus::Ok,
            ConstraintAnalysis::SafeRewrite(_) => ConstraintStatus::Stale,
            ConstraintAnalysis::NeedsReview => ConstraintStatus::NeedsReview,
        }
    }

    pub fn suggestion(&self) -> Option<&str> {
        match self {
            ConstraintAnalysis::SafeRewrite(constraint) => Some(constraint),
            _ => None,
        }
    }
}

/// Extract the base version of a constraint (`^12.0` -> `12.0`)
pub fn base_version(constraint: &str) -> Option<&str> {
    BASE_VERSION_RE.find(constraint).map(|m| m.as_str())
}

/// Analyze a declared constraint against the latest known version
pub fn analyze_constraint(constraint: &str, latest: Option<&str>) -> ConstraintAnalysis {
    let Some(latest) = latest else {
        return ConstraintAnalysis::Unaffected;
    };
    if constraint == NOT_AVAILABLE {
        return ConstraintAnalysis::Unaffected;
    }

    let constraint = constraint.trim();
    if constraint.is_empty() {
        return ConstraintAnalysis::NeedsReview;
    }

    let Some(base) = base_version(constraint) else {
        return ConstraintAnalysis::Unaffected;
    };

    if compare_versions(base, latest) != Ordering::Less {
        return ConstraintAnalysis::Unaffected;
    }

    suggest_rewrite(constraint, latest)
        .map(ConstraintAnalysis::SafeRewrite)
        .unwrap_or(ConstraintAnalysis::NeedsReview)
}

/// Build a replacement keeping the constraint's operator.
///
/// Operators only qualify when followed by a single bare version, so
/// compound constraints like `^1.0 || ^2.0` fall through to review.
fn suggest_rewrite(constraint: &str, latest: &str) -> Option<String> {
    if let Some(rest) = constraint.strip_prefix('^') {
        BARE_VERSION_RE
            .is_match(rest.trim())
            .then(|| format!("^{latest}"))
    } else if let Some(rest) = constraint.strip_prefix('~') {
        BARE_VERSION_RE
            .is_match(rest.trim())
            .then(|| format!("~{latest}"))
    } else if BARE_VERSION_RE.is_match(constraint) {
        Some(latest.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("^12.0", Some("12.5.0"), ConstraintAnalysis::SafeRewrite("^12.5.0".to_string()))]
    #[case("~7.8", Some("7.8.1"), ConstraintAnalysis::SafeRewrite("~7.8.1".to_string()))]
    #[case("12.0.1", Some("12.5.0"), ConstraintAnalysis::SafeRewrite("12.5.0".to_string()))]
    #[case("v12.0.1", Some("12.5.0"), ConstraintAnalysis::SafeRewrite("12.5.0".to_string()))]
    #[case(">=1.0 <2.0", Some("2.5.0"), ConstraintAnalysis::NeedsReview)]
    #[case("^1.0 || ^2.0", Some("3.0.0"), ConstraintAnalysis::NeedsReview)]
    #[case("1.0.*", Some("1.2.0"), ConstraintAnalysis::NeedsReview)]
    #[case("^12.0@dev", Some("12.5.0"), ConstraintAnalysis::NeedsReview)]
    #[case("^4.5.0", Some("4.5.0"), ConstraintAnalysis::Unaffected)] // already latest
    #[case("^5.0", Some("4.5.0"), ConstraintAnalysis::Unaffected)] // ahead of latest
    #[case("*", Some("4.5.0"), ConstraintAnalysis::Unaffected)] // no base version
    #[case("dev-main", Some("4.5.0"), ConstraintAnalysis::Unaffected)]
    #[case("^12.0", None, ConstraintAnalysis::Unaffected)] // latest unknown
    #[case("N/A", Some("12.5.0"), ConstraintAnalysis::Unaffected)]
    #[case("", Some("1.0.0"), ConstraintAnalysis::NeedsReview)]
    #[case("   ", Some("1.0.0"), ConstraintAnalysis::NeedsReview)]
    fn analyze_constraint_returns_expected_result(
        #[case] constraint: &str,
        #[case] latest: Option<&str>,
        #[case] expected: ConstraintAnalysis,
    ) {
        assert_eq!(analyze_constraint(constraint, latest), expected);
    }

    #[test]
    fn analysis_exposes_status_and_suggestion() {
        let stale = analyze_constraint("^12.0", Some("12.5.0"));
        assert_eq!(stale.status(), ConstraintStatus::Stale);
        assert_eq!(stale.suggestion(), Some("^12.5.0"));

        let review = analyze_constraint(">=1.0 <2.0", Some("2.5.0"));
        assert_eq!(review.status(), ConstraintStatus::NeedsReview);
        assert_eq!(review.suggestion(), None);

        let ok = analyze_constraint("^4.5.0", Some("4.5.0"));
        assert_eq!(ok.status(), ConstraintStatus::Ok);
        assert_eq!(ok.suggestion(), None);
    }

    #[rstest]
    #[case("^12.0", Some("12.0"))]
    #[case(">=1.0 <2.0", Some("1.0"))]
    #[case("~1.2.3.4.5", Some("1.2.3.4"))]
    #[case("*", None)]
    fn base_version_takes_first_version_run(#[case] constraint: &str, #[case] expected: Option<&str>) {
        assert_eq!(base_version(constraint), expected);
    }
}
