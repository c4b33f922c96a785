//! Content type detection for uploads.
//!
//! Looks at the leading bytes first and only falls back to the key's
//! extension when the bytes are not recognised.

/// Magic-number signatures, checked in order
const SIGNATURES: &[(&[u8], &str)] = &[
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"\xff\xd8\xff", "image/jpeg"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"%PDF-", "application/pdf"),
    (b"PK\x03\x04", "application/zip"),
    (b"\x1f\x8b\x08", "application/x-gzip"),
    (b"OggS\x00", "application/ogg"),
    (b"BM", "image/bmp"),
];

/// Detect the content type of an upload from its first bytes.
///
/// `head` should hold up to the first 512 bytes of the file.
pub fn detect(head: &[u8], key: &str) -> String {
    if let Some(mime) = sniff(head) {
        return mime.to_string();
    }

    if looks_like_text(head) {
        return "text/plain; charset=utf-8".to_string();
    }

    mime_guess::from_path(key)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

fn sniff(head: &[u8]) -> Option<&'static str> {
    let signature = SIGNATURES
        .iter()
        .find(|(sig, _)| head.starts_with(sig))
        .map(|(_, mime)| *mime);
    if signature.is_some() {
        return signature;
    }

    // RIFF containers carry their kind at offset 8
    if head.len() >= 12 && head.starts_with(b"RIFF") {
        match &head[8..12] {
            b"WEBP" => return Some("image/webp"),
            b"WAVE" => return Some("audio/wave"),
            b"AVI " => return Some("video/avi"),
            _ => {}
        }
    }

    // ISO base media: size(4) + "ftyp"
    if head.len() >= 12 && &head[4..8] == b"ftyp" {
        return Some("video/mp4");
    }

    None
}

fn looks_like_text(head: &[u8]) -> bool {
    if head.is_empty() {
        return false;
    }

    let text = match std::str::from_utf8(head) {
        Ok(text) => text,
        // The 512-byte window may split a multi-byte character
        Err(e) if e.error_len().is_none() => match std::str::from_utf8(&head[..e.valid_up_to()]) {
            Ok(text) => text,
            Err(_) => return false,
        },
        Err(_) => return false,
    };

    !text
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r' | '\x0c' | '\x1b'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_images_by_signature() {
        assert_eq!(detect(b"\x89PNG\r\n\x1a\nrest", "x.bin"), "image/png");
        assert_eq!(detect(b"\xff\xd8\xff\xe0", "x"), "image/jpeg");
        assert_eq!(detect(b"RIFF\x00\x00\x00\x00WEBPVP8 ", "x"), "image/webp");
    }

    #[test]
    fn test_signature_beats_extension() {
        assert_eq!(detect(b"%PDF-1.7\n", "notes.txt"), "application/pdf");
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(detect(b"abc", "a.txt"), "text/plain; charset=utf-8");
        assert_eq!(
            detect("héllo wörld\n".as_bytes(), "a"),
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn test_truncated_utf8_is_still_text() {
        let mut head = "aé".as_bytes().to_vec();
        head.pop();
        assert_eq!(detect(&head, "a"), "text/plain; charset=utf-8");
    }

    #[test]
    fn test_binary_falls_back_to_extension() {
        assert_eq!(detect(b"\x00\x01\x02\x03", "track.mp3"), "audio/mpeg");
        assert_eq!(
            detect(b"\x00\x01\x02\x03", "blob"),
            "application/octet-stream"
        );
    }
}
