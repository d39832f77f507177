//! Bundle display formatting
//!
//! Formats bundle listings and the backup configuration for terminal output.

use chrono::NaiveDateTime;

use crate::backup::BundleInfo;
use crate::config::BackupParameters;

/// Format a list of bundles as a table, newest first as given
pub fn format_bundle_list(bundles: &[BundleInfo], now: NaiveDateTime) -> String {
    if bundles.is_empty() {
        return "No backups found.".to_string();
    }

    let name_width = bundles
        .iter()
        .map(|b| b.filename.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<19}  {:>8}  {:>10}\n",
        "Name",
        "Created",
        "Age",
        "Size",
        name_width = name_width,
    ));

    output.push_str(&format!(
        "{:-<name_width$}  {:-<19}  {:->8}  {:->10}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for bundle in bundles {
        output.push_str(&format!(
            "{:<name_width$}  {:<19}  {:>8}  {:>10}\n",
            bundle.filename,
            bundle.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            format_age(now.signed_duration_since(bundle.created_at)),
            format_size(bundle.size_bytes),
            name_width = name_width,
        ));
    }

    let total: u64 = bundles.iter().map(|b| b.size_bytes).sum();
    output.push('\n');
    output.push_str(&format!(
        "Total: {} backup(s), {}\n",
        bundles.len(),
        format_size(total)
    ));

    output
}

/// Format the backup configuration
pub fn format_parameters(params: &BackupParameters) -> String {
    let mut output = String::new();

    output.push_str(&format!("Backup directory: {}\n", params.backup_path.display()));
    output.push_str(&format!("Bundle prefix:    {}\n", params.backup_name));
    output.push_str(&format!(
        "Frequency:        every {}\n",
        format_interval(params.backup_frequency)
    ));
    output.push_str(&format!(
        "Expiry:           after {}\n",
        format_interval(params.expiry)
    ));
    output.push('\n');

    if params.file_list.is_empty() {
        output.push_str("Files: (none)\n");
    } else {
        output.push_str(&format!("Files ({}):\n", params.file_list.len()));
        for file in &params.file_list {
            let marker = if file.is_file() { "" } else { " (missing)" };
            output.push_str(&format!("  {}{}\n", file.display(), marker));
        }
    }

    output
}

/// Format a duration compactly (45s, 12m, 3h, 2d, 4mo)
pub fn format_age(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds();

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    let months = days / 30;
    format!("{}mo", months)
}

/// Format a configured interval the way [`format_age`] formats ages
///
/// Intervals too large for a chrono duration are shown at the chrono maximum.
pub fn format_interval(interval: std::time::Duration) -> String {
    format_age(chrono::Duration::from_std(interval).unwrap_or(chrono::Duration::MAX))
}

/// Format a byte count with a binary unit
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use std::time::Duration;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_format_bundle_list() {
        let bundles = vec![BundleInfo {
            filename: "Backup_20251001_080000.zip".into(),
            path: PathBuf::from("/backups/Backup_20251001_080000.zip"),
            created_at: at(8, 0, 0),
            size_bytes: 2048,
        }];

        let output = format_bundle_list(&bundles, at(10, 30, 0));
        assert!(output.contains("Backup_20251001_080000.zip"));
        assert!(output.contains("2025-10-01 08:00:00"));
        assert!(output.contains("2h"));
        assert!(output.contains("2.0 KB"));
        assert!(output.contains("Total: 1 backup(s)"));
    }

    #[test]
    fn test_format_empty_list() {
        assert_eq!(format_bundle_list(&[], at(0, 0, 0)), "No backups found.");
    }

    #[test]
    fn test_format_parameters() {
        let params = BackupParameters::new("/backups")
            .with_files(["/definitely/not/here.txt"])
            .with_frequency(Duration::from_secs(2))
            .with_expiry(Duration::from_secs(30 * 86_400));

        let output = format_parameters(&params);
        assert!(output.contains("every 2s"));
        assert!(output.contains("after 1mo"));
        assert!(output.contains("/definitely/not/here.txt (missing)"));
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(chrono::Duration::seconds(45)), "45s");
        assert_eq!(format_age(chrono::Duration::minutes(12)), "12m");
        assert_eq!(format_age(chrono::Duration::hours(3)), "3h");
        assert_eq!(format_age(chrono::Duration::days(2)), "2d");
        assert_eq!(format_age(chrono::Duration::days(65)), "2mo");
    }

    #[test]
    fn test_format_parameters_with_huge_intervals() {
        let params = BackupParameters::new("/backups")
            .with_files(["a.txt"])
            .with_frequency(Duration::from_secs(u64::MAX))
            .with_expiry(Duration::from_secs(10_000_000_000_000_000));

        let output = format_parameters(&params);
        assert!(output.contains("every "));
        assert!(!output.contains("every -"));
        assert!(!output.contains("after -"));
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(Duration::from_secs(2)), "2s");
        assert_eq!(format_interval(Duration::from_secs(86_400)), "1d");
        assert!(format_interval(Duration::from_secs(u64::MAX)).ends_with("mo"));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }
}
