// Resume intake: PDF text extraction for the uploaded document.

pub mod handlers;

use bytes::Bytes;
use tracing::{debug, error};

/// Extracts plain text from PDF bytes. Returns an empty string on any failure.
///
/// Parsing is CPU-bound and the PDF library may panic on malformed input, so it runs
/// inside `spawn_blocking`; a panic surfaces as a `JoinError` and degrades the same way.
pub async fn extract_text(pdf: Bytes) -> String {
    let result = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf)).await;

    match result {
        Ok(Ok(text)) => {
            debug!("Extracted {} chars from PDF", text.chars().count());
            text
        }
        Ok(Err(e)) => {
            error!("PDF extraction failed: {e}");
            String::new()
        }
        Err(e) => {
            error!("PDF extraction task aborted: {e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_non_pdf_bytes_yield_empty_text() {
        let text = extract_text(Bytes::from_static(b"definitely not a pdf")).await;
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_empty_upload_yields_empty_text() {
        assert!(extract_text(Bytes::new()).await.is_empty());
    }
}
