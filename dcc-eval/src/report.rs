use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// JSON counterpart of the summary printed on stdout
#[derive(Serialize)]
pub struct Report<'a, T> {
    pub operation: &'static str,
    pub log_file: &'a Path,
    pub lines_read: usize,
    pub summary: &'a T,
}

impl<T: Serialize> Report<'_, T> {
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(self).context("failed to serialize report")?;
        fs::write(path, json)
            .with_context(|| format!("failed to store report at `{}`", path.display()))
    }
}
