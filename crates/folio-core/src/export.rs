//! Source export loading.
//!
//! The export is either a bare JSON array of projects or an object whose
//! `project_list` field holds that array. Both shapes are accepted.

use std::path::Path;

use serde_json::Value;

use crate::errors::CoreError;
use crate::source::SourceProject;

/// Field name of the wrapped export shape.
pub const PROJECT_LIST_FIELD: &str = "project_list";

/// Parse an export document into its ordered project list.
///
/// Records are decoded one by one so a failure names the offending record.
///
/// # Errors
///
/// Returns [`CoreError::InvalidExport`] if the text is not JSON, matches
/// neither shape, or contains a record that does not decode or has a blank
/// id.
pub fn parse_export(text: &str) -> Result<Vec<SourceProject>, CoreError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| CoreError::InvalidExport(e.to_string()))?;

    let records = match value {
        Value::Array(records) => records,
        Value::Object(mut map) => match map.remove(PROJECT_LIST_FIELD) {
            Some(Value::Array(records)) => records,
            _ => return Err(shape_error()),
        },
        _ => return Err(shape_error()),
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let project: SourceProject = serde_json::from_value(record).map_err(|e| {
                CoreError::InvalidExport(format!("project #{}: {e}", index + 1))
            })?;
            project
                .validate()
                .map_err(|e| CoreError::InvalidExport(format!("project #{}: {e}", index + 1)))?;
            Ok(project)
        })
        .collect()
}

fn shape_error() -> CoreError {
    CoreError::InvalidExport(format!(
        "expected an array of projects or an object with a `{PROJECT_LIST_FIELD}` array"
    ))
}

/// Read and parse the export file at `path`.
///
/// # Errors
///
/// Returns [`CoreError::ExportNotFound`] if the file is missing,
/// [`CoreError::ExportRead`] if it cannot be read, and
/// [`CoreError::InvalidExport`] if its content is malformed.
pub fn read_export(path: &Path) -> Result<Vec<SourceProject>, CoreError> {
    if !path.exists() {
        return Err(CoreError::ExportNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| CoreError::ExportRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_export(&text)
}
