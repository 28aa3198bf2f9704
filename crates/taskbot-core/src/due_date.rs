//! Due-date extraction from free text.

/// Return the first `NNNN-NN-NN` token in `text`.
///
/// Only the digit/dash shape is checked: `2025-13-99` is returned as-is.
/// Relative expressions ("tomorrow", "next Monday") are not recognized.
pub fn extract(text: &str) -> Option<String> {
    const SHAPE: &[u8] = b"dddd-dd-dd";
    let bytes = text.as_bytes();
    if bytes.len() < SHAPE.len() {
        return None;
    }

    (0..=bytes.len() - SHAPE.len())
        .find(|&start| {
            SHAPE
                .iter()
                .zip(&bytes[start..start + SHAPE.len()])
                .all(|(want, got)| match want {
                    b'd' => got.is_ascii_digit(),
                    _ => got == want,
                })
        })
        // Matched bytes are all ASCII, so the slice sits on char boundaries.
        .map(|start| text[start..start + SHAPE.len()].to_string())
}
