use super::ScrapeReport;
use crate::ScraperResult;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the report as one pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct DiskStorage {
    path: PathBuf,
}

impl DiskStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the file in one rename so readers never see half a report.
    pub fn save(&self, report: &ScrapeReport) -> ScraperResult<PathBuf> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut json = serde_json::to_string_pretty(report)?;
        json.push('\n');

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!("Wrote report to {}", self.path.display());

        Ok(self.path.clone())
    }

    pub fn load(&self) -> ScraperResult<ScrapeReport> {
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
