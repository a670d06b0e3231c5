//! Destination filename resolution
//!
//! Names are taken from the last URL path segment when it yields something
//! usable, otherwise a timestamped `download_*` name is generated. Either way
//! the content type fills in a missing extension when one can be guessed.

use std::path::Path;

use chrono::Local;
use reqwest::Url;

use crate::constants::{ALLOWED_EXTENSIONS, FALLBACK_EXTENSION, MAX_FILENAME_LENGTH};

/// Characters never allowed in a staged filename
const INVALID_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Extensions preferred over the first `mime_guess` candidate
const PREFERRED_EXTENSIONS: &[(&str, &str)] = &[
    ("application/octet-stream", "bin"),
    ("application/pdf", "pdf"),
    ("application/zip", "zip"),
    ("audio/mpeg", "mp3"),
    ("image/jpeg", "jpg"),
    ("text/plain", "txt"),
    ("video/mp4", "mp4"),
];

/// Derive the destination filename for `url`
pub fn resolve_filename(url: &Url, content_type: Option<&str>) -> String {
    let from_path = url
        .path_segments()
        .and_then(|segments| segments.last())
        .map(decode_segment)
        .map(|segment| sanitize_filename(&segment))
        .filter(|name| !name.is_empty());

    let guessed = content_type.and_then(guess_extension);

    match from_path {
        Some(name) if extension_of(&name).is_some() => name,
        Some(name) => match guessed {
            Some(ext) => format!("{}.{}", name, ext),
            None => name,
        },
        None => format!(
            "download_{}.{}",
            Local::now().format("%Y%m%d_%H%M%S"),
            guessed.unwrap_or(FALLBACK_EXTENSION)
        ),
    }
}

/// Remove characters that are unsafe in filenames and cap the length
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !INVALID_CHARS.contains(c) && !c.is_control())
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();

    truncate_filename(cleaned.trim_start_matches('.'))
}

/// Guess a file extension (without dot) from a `Content-Type` header value
pub fn guess_extension(content_type: &str) -> Option<&'static str> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    if essence.is_empty() {
        return None;
    }

    if let Some((_, ext)) = PREFERRED_EXTENSIONS.iter().find(|(mime, _)| *mime == essence) {
        return Some(ext);
    }

    mime_guess::get_mime_extensions_str(&essence).and_then(|exts| exts.first().copied())
}

/// Check the name's extension against the allow-list
///
/// Names without an extension are accepted.
pub fn is_extension_allowed(name: &str) -> bool {
    match extension_of(name) {
        Some(ext) => ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => true,
    }
}

fn extension_of(name: &str) -> Option<&str> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
}

fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

fn truncate_filename(name: &str) -> String {
    if name.chars().count() <= MAX_FILENAME_LENGTH {
        return name.to_string();
    }

    // Keep short extensions intact, cut the stem instead
    match name.rfind('.') {
        Some(dot) if dot > 0 && name[dot..].chars().count() <= 5 => {
            let ext = &name[dot..];
            let keep = MAX_FILENAME_LENGTH - 5;
            name[..dot].chars().take(keep).chain(ext.chars()).collect()
        }
        _ => name.chars().take(MAX_FILENAME_LENGTH).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn test_name_from_path() {
        assert_eq!(resolve_filename(&url("https://example.com/file.pdf"), None), "file.pdf");
        assert_eq!(
            resolve_filename(&url("https://example.com/a/b/video.mp4?token=abc#t=10"), None),
            "video.mp4"
        );
        assert_eq!(
            resolve_filename(&url("https://example.com/My%20Report%20(final).pdf"), None),
            "My_Report_(final).pdf"
        );
    }

    #[test]
    fn test_extension_appended_from_content_type() {
        assert_eq!(
            resolve_filename(&url("https://example.com/report"), Some("application/pdf")),
            "report.pdf"
        );
        assert_eq!(
            resolve_filename(&url("https://example.com/photo"), Some("image/jpeg; charset=binary")),
            "photo.jpg"
        );
        assert_eq!(resolve_filename(&url("https://example.com/report"), None), "report");
    }

    #[test]
    fn test_fallback_name() {
        let name = resolve_filename(&url("https://example.com/"), Some("application/zip"));
        assert!(name.starts_with("download_"), "{}", name);
        assert!(name.ends_with(".zip"), "{}", name);

        let name = resolve_filename(&url("https://example.com"), None);
        assert!(name.starts_with("download_"), "{}", name);
        assert!(name.ends_with(".bin"), "{}", name);

        // Segment that sanitises to nothing
        let name = resolve_filename(&url("https://example.com/%3F%3F"), None);
        assert!(name.starts_with("download_"), "{}", name);
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("a<b>c:d\"e|f?g*h.txt"), "abcdefgh.txt");
        assert_eq!(sanitize_filename("dir/..\\file.zip"), "dir..file.zip");
        assert_eq!(sanitize_filename("my file name.mp3"), "my_file_name.mp3");
        assert_eq!(sanitize_filename("..hidden"), "hidden");
        assert_eq!(sanitize_filename("tab\there.txt"), "tab_here.txt");
        assert_eq!(sanitize_filename("bell\u{7}.txt"), "bell.txt");
    }

    #[test]
    fn test_truncate_long_names() {
        let long = format!("{}.pdf", "a".repeat(150));
        let cut = sanitize_filename(&long);
        assert_eq!(cut.chars().count(), 99);
        assert!(cut.ends_with(".pdf"));

        let long_ext = format!("{}.{}", "a".repeat(120), "b".repeat(20));
        assert_eq!(sanitize_filename(&long_ext).chars().count(), MAX_FILENAME_LENGTH);

        let multibyte = format!("{}.mp4", "é".repeat(120));
        let cut = sanitize_filename(&multibyte);
        assert!(cut.ends_with(".mp4"));
        assert!(cut.chars().count() <= MAX_FILENAME_LENGTH);
    }

    #[test]
    fn test_guess_extension() {
        assert_eq!(guess_extension("application/pdf"), Some("pdf"));
        assert_eq!(guess_extension("TEXT/PLAIN; charset=utf-8"), Some("txt"));
        assert_eq!(guess_extension("image/png"), Some("png"));
        assert_eq!(guess_extension(""), None);
        assert_eq!(guess_extension("application/x-definitely-not-real"), None);
    }

    #[test]
    fn test_is_extension_allowed() {
        assert!(is_extension_allowed("movie.MKV"));
        assert!(is_extension_allowed("archive.tar.gz"));
        assert!(is_extension_allowed("README"));
        assert!(is_extension_allowed("download_20240101_000000.bin"));
        assert!(!is_extension_allowed("script.sh"));
        assert!(!is_extension_allowed("page.html"));
    }
}
