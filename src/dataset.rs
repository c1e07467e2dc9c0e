use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{FilterError, Result};
use crate::types::CourseSection;

/// Reads the full input dump into memory. The dataset is small (hundreds to
/// low thousands of sections), so there is no point streaming it.
pub fn load_sections(path: &Path) -> Result<Vec<CourseSection>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        FilterError::Dataset(format!("Failed to read input file '{}': {}", path.display(), e))
    })?;
    let sections: Vec<CourseSection> = serde_json::from_str(&contents)?;
    info!(count = sections.len(), path = %path.display(), "loaded input dataset");
    Ok(sections)
}

/// Writes the cleaned dataset as a pretty-printed JSON array.
pub fn write_sections(path: &Path, sections: &[CourseSection]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let contents = serde_json::to_string_pretty(sections)?;
    fs::write(path, contents).map_err(|e| {
        FilterError::Dataset(format!(
            "Failed to write output file '{}': {}",
            path.display(),
            e
        ))
    })?;
    info!(count = sections.len(), path = %path.display(), "wrote cleaned dataset");
    Ok(())
}
