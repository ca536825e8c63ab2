//! Attachment page images read from a directory.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use proposal_core::encode_data_url;
use regex::Regex;

use crate::error::ExportError;
use crate::mime::detect_mime;

const ATTACHMENT_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*$").expect("built-in pattern must compile"));

static ANY_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("built-in pattern must compile"));

/// Image files in `dir`, ordered by the page number in their names.
///
/// A directory that does not exist yields no attachments.
pub fn list_attachment_images(dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let read_err = |source| ExportError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && has_image_extension(&path) {
            files.push(path);
        }
    }

    files.sort_by_cached_key(|path| sort_key(path));
    Ok(files)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| ATTACHMENT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// Number at the end of the file stem, else the last number in it.
/// Names without digits sort last; ties fall back to the file name.
pub fn sort_key(path: &Path) -> (u64, String) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();

    let number = TRAILING_NUMBER
        .captures(&stem)
        .and_then(|caps| caps.get(1))
        .or_else(|| ANY_NUMBER.find_iter(&stem).last())
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .unwrap_or(u64::MAX);

    (number, name)
}

/// Read each file and encode it as a `data:` URL, in order.
pub fn embed_attachments(paths: &[PathBuf]) -> Result<Vec<String>, ExportError> {
    paths
        .iter()
        .map(|path| {
            let bytes = std::fs::read(path).map_err(|source| ExportError::Read {
                path: path.clone(),
                source,
            })?;
            Ok(encode_data_url(&bytes, detect_mime(path, &bytes)))
        })
        .collect()
}
