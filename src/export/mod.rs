use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::error::ExportError;
use crate::api::ApiClient;
use crate::models::FilterCriteria;

/// `attendance_report_<ISO-date>.xlsx`, dated the day the export runs.
pub fn report_filename() -> String {
    format!("attendance_report_{}.xlsx", Local::now().format("%Y-%m-%d"))
}

/// Local precondition for an export: refuse before any network traffic when
/// there is nothing on display to export.
pub fn ensure_exportable(record_count: usize) -> Result<(), ExportError> {
    if record_count == 0 {
        Err(ExportError::Empty)
    } else {
        Ok(())
    }
}

/// Downloads the spreadsheet for `criteria` into `out_dir` and returns the
/// final path. The empty check runs first; only then does the request fire.
pub async fn export_report(
    client: &ApiClient,
    criteria: &FilterCriteria,
    record_count: usize,
    out_dir: &Path,
) -> Result<PathBuf, ExportError> {
    ensure_exportable(record_count)?;
    let blob = client.export_report(criteria).await?;
    Ok(save_report(&blob, out_dir, &report_filename())?)
}

/// Writes the blob through a partial file and renames it into place, so a
/// failed write never leaves a half-written `.xlsx` behind.
pub fn save_report(blob: &[u8], out_dir: &Path, filename: &str) -> std::io::Result<PathBuf> {
    let final_path = out_dir.join(filename);
    let part = PartFile::create(out_dir.join(format!("{}.part", filename)), blob)?;
    part.persist(&final_path)?;
    Ok(final_path)
}

/// Scoped partial-file handle: created with the payload already written,
/// removed on drop unless persisted.
struct PartFile {
    path: PathBuf,
    persisted: bool,
}

impl PartFile {
    fn create(path: PathBuf, blob: &[u8]) -> std::io::Result<Self> {
        fs::write(&path, blob)?;
        Ok(Self {
            path,
            persisted: false,
        })
    }

    fn persist(mut self, final_path: &Path) -> std::io::Result<()> {
        fs::rename(&self.path, final_path)?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for PartFile {
    fn drop(&mut self) {
        if !self.persisted {
            let _ = fs::remove_file(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_set_refuses_before_any_network_call() {
        assert!(matches!(ensure_exportable(0), Err(ExportError::Empty)));
        assert!(ensure_exportable(1).is_ok());
    }

    #[test]
    fn report_filename_embeds_the_current_date() {
        let name = report_filename();
        let expected = format!("attendance_report_{}.xlsx", Local::now().format("%Y-%m-%d"));
        assert_eq!(name, expected);
    }

    #[test]
    fn save_report_leaves_only_the_final_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_report(b"spreadsheet bytes", dir.path(), "report.xlsx").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"spreadsheet bytes");
        assert!(!dir.path().join("report.xlsx.part").exists());
    }

    #[test]
    fn failed_persist_removes_the_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let part_path = dir.path().join("report.xlsx.part");
        let part = PartFile::create(part_path.clone(), b"bytes").unwrap();
        assert!(part_path.exists());

        // Renaming into a directory that does not exist fails.
        let missing = dir.path().join("missing").join("report.xlsx");
        assert!(part.persist(&missing).is_err());
        assert!(!part_path.exists());
    }
}
