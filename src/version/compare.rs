//! Version comparison for Composer-style version strings
//!
//! Versions carry up to four dot-separated numeric components
//! (major.minor.patch.build) and may be prefixed with `v`.

use std::cmp::Ordering;

/// Strip surrounding whitespace and a leading `v` prefix.
///
/// Examples:
/// - "v12.0.1" -> "12.0.1"
/// - "4.3.0" -> "4.3.0"
pub fn normalize_version(version: &str) -> &str {
    version.trim().trim_start_matches(['v', 'V'])
}

/// Split a version into its numeric components.
///
/// Each component contributes its leading digits; a component without any
/// (e.g. `x` in `1.x`) counts as zero.
fn components(version: &str) -> Vec<u64> {
    normalize_version(version)
        .split('.')
        .map(|part| {
            let end = part
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(part.len());
            part[..end].parse().unwrap_or(0)
        })
        .collect()
}

/// Compare two version strings component-wise.
///
/// A shorter version is padded with trailing zeros, so `1.2` equals `1.2.0.0`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a = components(a);
    let b = components(b);
    let len = a.len().max(b.len());

    (0..len)
        .map(|i| {
            let left = a.get(i).copied().unwrap_or(0);
            let right = b.get(i).copied().unwrap_or(0);
            left.cmp(&right)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Returns true when `installed` is older than `latest`.
pub fn is_outdated(installed: &str, latest: &str) -> bool {
    compare_versions(installed, latest) == Ordering::Less
}
