use std::path::Path;

use crate::error::{Result, TrackerError};

pub const DEFAULT_HANDLES: &[&str] = &["fardinkamal62", "tourist", "jiangly"];

/// Parse roster text: one handle per line, `#` starts a comment, duplicates keep first position.
pub fn parse(text: &str) -> Vec<String> {
    let mut handles: Vec<String> = Vec::new();
    for line in text.lines() {
        let handle = line.split('#').next().unwrap_or_default().trim();
        if !handle.is_empty() && !handles.iter().any(|h| h == handle) {
            handles.push(handle.to_string());
        }
    }
    handles
}

pub fn load(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(TrackerError::MissingRoster(path.display().to_string()));
    }
    let handles = parse(&std::fs::read_to_string(path)?);
    if handles.is_empty() {
        return Err(TrackerError::EmptyRoster(path.display().to_string()));
    }
    Ok(handles)
}

/// Write the default roster unless `path` already exists. Returns whether a file was written.
pub fn write_default(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    let mut content = String::from("# One Codeforces handle per line\n");
    for handle in DEFAULT_HANDLES {
        content.push_str(handle);
        content.push('\n');
    }
    std::fs::write(path, content)?;
    Ok(true)
}
