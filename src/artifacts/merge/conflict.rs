use bytes::Bytes;

pub const CURRENT_MARKER: &str = "<<<<<<< HEAD\n";
pub const SEPARATOR_MARKER: &str = "=======\n";
pub const GIVEN_MARKER: &str = ">>>>>>>\n";

/// Conflict marker block for one path
///
/// A missing side renders as empty. Contents are inserted verbatim, so a side
/// without a trailing newline runs straight into the following marker.
pub fn render(current: Option<&[u8]>, given: Option<&[u8]>) -> Bytes {
    let current = current.unwrap_or_default();
    let given = given.unwrap_or_default();

    let mut merged = Vec::with_capacity(
        CURRENT_MARKER.len() + current.len() + SEPARATOR_MARKER.len() + given.len() + GIVEN_MARKER.len(),
    );
    merged.extend_from_slice(CURRENT_MARKER.as_bytes());
    merged.extend_from_slice(current);
    merged.extend_from_slice(SEPARATOR_MARKER.as_bytes());
    merged.extend_from_slice(given);
    merged.extend_from_slice(GIVEN_MARKER.as_bytes());

    Bytes::from(merged)
}
