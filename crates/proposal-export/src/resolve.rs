//! Turning image references found in a template into bytes.

use std::path::{Component, Path, PathBuf};

use crate::error::ExportError;
use crate::mime::detect_mime;

/// Image bytes located for a template reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub mime: String,
}

/// Source of image bytes for the references a template uses.
///
/// `Ok(None)` means the reference is simply not available; the build
/// leaves that `src` untouched. Errors are reserved for files that exist
/// but cannot be read.
pub trait ImageResolver {
    fn resolve(&self, src: &str) -> Result<Option<ResolvedImage>, ExportError>;
}

/// Looks references up as relative paths under an ordered list of roots.
///
/// URLs, absolute paths and paths climbing out with `..` never resolve.
#[derive(Debug, Clone, Default)]
pub struct DirectoryResolver {
    roots: Vec<PathBuf>,
}

impl DirectoryResolver {
    pub fn new(roots: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            roots: roots.into_iter().collect(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl ImageResolver for DirectoryResolver {
    fn resolve(&self, src: &str) -> Result<Option<ResolvedImage>, ExportError> {
        let Some(relative) = local_reference(src) else {
            tracing::debug!(src, "not a local reference");
            return Ok(None);
        };

        for root in &self.roots {
            let path = root.join(relative);
            if !path.is_file() {
                continue;
            }
            let bytes = std::fs::read(&path).map_err(|source| ExportError::Read {
                path: path.clone(),
                source,
            })?;
            let mime = detect_mime(&path, &bytes).to_string();
            tracing::debug!(src, path = %path.display(), mime = %mime, "image resolved");
            return Ok(Some(ResolvedImage { path, bytes, mime }));
        }

        Ok(None)
    }
}

/// Relative file path for `src`, with any query or fragment dropped.
fn local_reference(src: &str) -> Option<&Path> {
    if src.contains("://") || src.starts_with("//") {
        return None;
    }
    let end = src.find(['?', '#']).unwrap_or(src.len());
    let path = Path::new(&src[..end]);
    if path.as_os_str().is_empty() || src.starts_with('/') || path.is_absolute() {
        return None;
    }
    if path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return None;
    }
    Some(path)
}
