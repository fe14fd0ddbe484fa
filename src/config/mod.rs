pub mod job;
pub mod merged;
pub mod settings;

use settings::Settings;
use std::path::Path;

/// Auto-discover and load `settings.yaml` for a job file.
///
/// If a `settings.yaml` exists in the job file's directory it is loaded,
/// otherwise the defaults are returned.
pub fn load_settings_for_job(job_file_path: &Path) -> crate::error::Result<Settings> {
    let dir = job_file_path
        .parent()
        .ok_or_else(|| crate::error::PdfDiffError::config("Cannot determine job file directory"))?;

    let settings_path = dir.join("settings.yaml");

    if settings_path.exists() {
        Settings::from_file(&settings_path)
    } else {
        Ok(Settings::default())
    }
}
