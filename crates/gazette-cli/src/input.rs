//! Reading input files into a source document.

use crate::error::{CliError, Result};
use gazette_domain::SourceDocument;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Read one UTF-8 text file.
pub fn read_document(path: &Path) -> Result<SourceDocument> {
    if !path.exists() {
        return Err(CliError::InvalidInput(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|_| {
        CliError::InvalidInput(format!("{} is not UTF-8 text", path.display()))
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    debug!(file = %name, chars = text.chars().count(), "Read input");
    Ok(SourceDocument::new(name, text))
}

/// Read every input and fold them into one document.
///
/// Files that cannot be read are skipped with a warning; it is an error
/// only when none can be read.
pub fn read_documents<P: AsRef<Path>>(paths: &[P]) -> Result<SourceDocument> {
    if paths.is_empty() {
        return Err(CliError::InvalidInput("No input files given".to_string()));
    }

    let mut docs = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();
    for path in paths {
        match read_document(path.as_ref()) {
            Ok(doc) => docs.push(doc),
            Err(e) => {
                warn!("Skipping input: {}", e);
                failures.push(e.to_string());
            }
        }
    }

    if docs.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "No input could be read: {}",
            failures.join("; ")
        )));
    }
    Ok(SourceDocument::combine(docs))
}
