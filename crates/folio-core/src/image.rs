//! Inline image codec.
//!
//! Images travel inside JSON as `data:{mime};base64,{payload}` references.
//! A reference carrying that marker is a new upload; anything else (a
//! public path, or an empty string) passes through the save pipeline
//! unchanged. Both directions are total: malformed input yields "no
//! image" / "no bytes", never an error.

use base64::Engine;

use crate::defaults::INLINE_IMAGE_MARKER;

/// MIME types the codec will stamp onto an encoded reference.
const SNIFFED_MIMES: &[&str] = &["image/png", "image/jpeg", "image/webp"];

/// Fallback MIME when the payload matches no known signature.
const FALLBACK_MIME: &str = "image/jpeg";

/// How far into the payload the SVG text sniff looks.
const SVG_SNIFF_WINDOW: usize = 1024;

/// Infer an image MIME type from magic bytes.
///
/// PNG, JPEG, and WEBP are detected by signature; SVG by a textual sniff
/// for `svg` near the start (SVG is XML and has no magic bytes). Anything
/// else is reported as JPEG.
pub fn sniff_mime(data: &[u8]) -> &'static str {
    if let Some(kind) = infer::get(data) {
        if let Some(mime) = SNIFFED_MIMES.iter().copied().find(|m| *m == kind.mime_type()) {
            return mime;
        }
    }

    let window = &data[..data.len().min(SVG_SNIFF_WINDOW)];
    let text = String::from_utf8_lossy(window);
    if text.to_ascii_lowercase().contains("svg") {
        return "image/svg+xml";
    }

    FALLBACK_MIME
}

/// File extension for a sniffed MIME type.
pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/gif" => "gif",
        _ => "jpg",
    }
}

/// True if the reference carries the inline-data marker (a new upload).
pub fn is_inline(reference: &str) -> bool {
    reference.starts_with(INLINE_IMAGE_MARKER)
}

/// Encode raw image bytes as an inline reference.
///
/// Returns `None` for an empty payload rather than an encoded empty blob.
pub fn encode_inline(data: &[u8]) -> Option<String> {
    if data.is_empty() {
        return None;
    }
    let mime = sniff_mime(data);
    let payload = base64::engine::general_purpose::STANDARD.encode(data);
    Some(format!("data:{};base64,{}", mime, payload))
}

/// Decode an inline reference back to raw bytes.
///
/// Accepts only references carrying the inline marker; plain paths, empty
/// strings, and references with a missing or malformed payload yield
/// `None`.
pub fn decode_inline(reference: &str) -> Option<Vec<u8>> {
    if !is_inline(reference) {
        return None;
    }
    let payload = reference.split(";base64,").nth(1)?;
    if payload.is_empty() {
        return None;
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .ok()
}
