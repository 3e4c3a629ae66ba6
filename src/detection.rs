//! MIME type and file extension detection.
//!
//! Used to fill an empty content type and to derive a canonical file's
//! extension. Magic bytes (`infer`) win over the file name (`mime_guess`).

/// Sniff a content type from the payload, falling back to the file name.
pub fn sniff_content_type(bytes: &[u8], name: Option<&str>) -> Option<String> {
    if let Some(kind) = infer::get(bytes) {
        return Some(kind.mime_type().to_string());
    }
    name.and_then(mime_from_filename)
}

/// Guess a content type from a file name's extension.
pub fn mime_from_filename(name: &str) -> Option<String> {
    mime_guess::from_path(name).first().map(|m| m.to_string())
}

/// The extension of a file name, without the dot.
pub fn extension_from_filename(name: &str) -> Option<String> {
    std::path::Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| e.to_string())
}

/// The preferred extension registered for a content type.
pub fn extension_from_mime(mime: &str) -> Option<String> {
    let essence = mime.split(';').next().unwrap_or(mime).trim();
    mime_guess::get_mime_extensions_str(essence)
        .and_then(|exts| exts.first().copied())
        .map(|e| e.to_string())
}
