//! File fetching and decoding
//!
//! Downloads linked artifacts (plain text, CSV, PDF) and turns them into
//! bounded text for summarization. Every failure path degrades to "no
//! content": the crawl never stops because a file was broken.

use reqwest::Client;

/// Hard cap on decoded file text (plain text and PDF), in characters
pub const FILE_TEXT_CAP: usize = 5000;

/// Number of leading lines kept from CSV files
pub const CSV_LINE_CAP: usize = 50;

/// Recognized decode targets for a downloaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    PlainText,
    Csv,
    Pdf,
}

/// Fetches a file URL and decodes its body into bounded text
///
/// Dispatch is by URL extension first, declared Content-Type second. Any
/// non-success status, transport error, decode failure, or empty decode is
/// logged and mapped to `None`; nothing propagates to the caller.
pub async fn fetch_file(client: &Client, url: &str) -> Option<String> {
    let response = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("File request error for {}: {}", url, e);
            return None;
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("File download failed with status {} for {}", status.as_u16(), url);
        return None;
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let bytes = match response.bytes().await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!("Failed to read file body of {}: {}", url, e);
            return None;
        }
    };

    let Some(kind) = detect_kind(url, &content_type) else {
        tracing::warn!("Unrecognized file type for {} (content-type: {})", url, content_type);
        return None;
    };

    let decoded = match kind {
        FileKind::PlainText => Some(decode_text(&bytes)),
        FileKind::Csv => Some(decode_csv_head(&bytes)),
        FileKind::Pdf => decode_pdf(&bytes, url),
    };

    match decoded {
        Some(text) if !text.trim().is_empty() => {
            tracing::info!("Downloaded file {} ({} chars)", url, text.chars().count());
            Some(text)
        }
        Some(_) => {
            tracing::warn!("File {} decoded to empty text", url);
            None
        }
        None => None,
    }
}

/// Picks a decode target: extension first, content type second
fn detect_kind(url: &str, content_type: &str) -> Option<FileKind> {
    let lower = url.to_lowercase();
    if lower.ends_with(".txt") {
        return Some(FileKind::PlainText);
    }
    if lower.ends_with(".csv") {
        return Some(FileKind::Csv);
    }
    if lower.ends_with(".pdf") {
        return Some(FileKind::Pdf);
    }

    if content_type.contains("text/csv") {
        Some(FileKind::Csv)
    } else if content_type.contains("text/plain") {
        Some(FileKind::PlainText)
    } else if content_type.contains("application/pdf") {
        Some(FileKind::Pdf)
    } else {
        None
    }
}

/// Decodes raw bytes as text, capped at [`FILE_TEXT_CAP`] characters
fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.chars().take(FILE_TEXT_CAP).collect()
}

/// Keeps the first [`CSV_LINE_CAP`] lines of a CSV body
///
/// No further truncation is applied beyond the line cap.
fn decode_csv_head(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.lines()
        .take(CSV_LINE_CAP)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extracts PDF text, capped at [`FILE_TEXT_CAP`] characters
///
/// A malformed PDF is logged and dropped; pages without extractable text
/// contribute nothing.
fn decode_pdf(bytes: &[u8], url: &str) -> Option<String> {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) => Some(text.chars().take(FILE_TEXT_CAP).collect()),
        Err(e) => {
            tracing::warn!("Failed to extract PDF text from {}: {}", url, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_kind_by_extension() {
        assert_eq!(detect_kind("https://x.test/a.txt", ""), Some(FileKind::PlainText));
        assert_eq!(detect_kind("https://x.test/a.CSV", ""), Some(FileKind::Csv));
        assert_eq!(detect_kind("https://x.test/a.pdf", ""), Some(FileKind::Pdf));
    }

    #[test]
    fn test_detect_kind_extension_wins_over_content_type() {
        assert_eq!(
            detect_kind("https://x.test/a.txt", "application/pdf"),
            Some(FileKind::PlainText)
        );
    }

    #[test]
    fn test_detect_kind_by_content_type() {
        assert_eq!(
            detect_kind("https://x.test/download?id=1", "text/plain; charset=utf-8"),
            Some(FileKind::PlainText)
        );
        assert_eq!(detect_kind("https://x.test/d", "text/csv"), Some(FileKind::Csv));
        assert_eq!(detect_kind("https://x.test/d", "application/pdf"), Some(FileKind::Pdf));
    }

    #[test]
    fn test_detect_kind_unrecognized() {
        assert_eq!(detect_kind("https://x.test/image.png", "image/png"), None);
    }

    #[test]
    fn test_decode_text_is_capped() {
        let big = "a".repeat(FILE_TEXT_CAP + 500);
        let decoded = decode_text(big.as_bytes());
        assert_eq!(decoded.chars().count(), FILE_TEXT_CAP);
    }

    #[test]
    fn test_decode_csv_keeps_first_lines() {
        let body: String = (0..100)
            .map(|i| format!("row{},value{}\n", i, i))
            .collect();
        let decoded = decode_csv_head(body.as_bytes());
        assert_eq!(decoded.lines().count(), CSV_LINE_CAP);
        assert!(decoded.starts_with("row0,value0"));
        assert!(decoded.ends_with("row49,value49"));
    }

    #[test]
    fn test_decode_csv_short_file_untouched() {
        let decoded = decode_csv_head(b"a,b\n1,2");
        assert_eq!(decoded, "a,b\n1,2");
    }

    #[test]
    fn test_decode_pdf_rejects_garbage() {
        assert_eq!(decode_pdf(b"not a pdf at all", "https://x.test/a.pdf"), None);
    }
}
