use std::io::ErrorKind;
use std::path::Path;

use crate::error::ExportError;

pub const TEMPLATE_FILE: &str = "proposal_template.html";

/// Read the template text.
///
/// A missing file is reported as [`ExportError::TemplateNotFound`]; the
/// pipeline stops there and produces no output.
pub fn load_template(path: &Path) -> Result<String, ExportError> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            tracing::debug!(path = %path.display(), bytes = text.len(), "template loaded");
            Ok(text)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Err(ExportError::TemplateNotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(ExportError::TemplateUnreadable {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write `contents` next to `path` and rename it into place, so a reader
/// never sees a half-written file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    let write_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    std::fs::write(&tmp, contents).map_err(write_err)?;
    std::fs::rename(&tmp, path).map_err(write_err)?;
    Ok(())
}
