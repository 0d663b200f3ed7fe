use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::SheetError;
use crate::roster::RosterStore;
use crate::sheet;

/// Writes a timestamped copy of the roster into the backup directory,
/// creating it if absent. The primary data file is never touched.
pub fn create_backup(
    backup_dir: &Path,
    source_label: &str,
    roster: &RosterStore,
) -> Result<PathBuf, SheetError> {
    std::fs::create_dir_all(backup_dir)?;

    let out_path = backup_dir.join(backup_filename(source_label));
    sheet::export(&out_path, roster)?;
    info!(path = %out_path.display(), "backup created");
    Ok(out_path)
}

fn backup_filename(source_label: &str) -> String {
    let stamp = sheet::timestamp_for_filename();
    let stem = source_label
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(source_label);
    format!("backup_{stem}_{stamp}.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_strips_extension_and_is_path_safe() {
        let name = backup_filename("students.csv");
        assert!(name.starts_with("backup_students_"));
        assert!(name.ends_with(".csv"));
        assert!(!name.contains(' '));
        assert!(!name.contains(':'));
    }

    #[test]
    fn filename_without_extension_keeps_label() {
        let name = backup_filename("roster");
        assert!(name.starts_with("backup_roster_"));
    }
}
