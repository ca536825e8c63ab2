//! MIME type detection for embedded images.

use std::path::Path;

pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// MIME type from the file extension, `image/jpeg` when unknown.
pub fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg" | "jpeg" | "jpe") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",
        _ => DEFAULT_IMAGE_MIME,
    }
}

/// MIME type from the leading signature bytes, if recognisable.
///
/// Uploaded slot images are stored under the placeholder's name whatever
/// their real format, so the content wins over the extension.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]) {
        Some("image/png")
    } else if bytes.starts_with(&[0xff, 0xd8, 0xff]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"BM") {
        Some("image/bmp")
    } else {
        None
    }
}

/// Content signature first, extension second.
pub fn detect_mime(path: &Path, bytes: &[u8]) -> &'static str {
    sniff_mime(bytes).unwrap_or_else(|| guess_mime(path))
}
