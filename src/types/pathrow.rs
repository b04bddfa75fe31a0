/// Coarse identifier for a path/row pair: both components zero-padded to
/// three digits and concatenated, e.g. (34, 38) -> "034038".
pub fn pathrow_id(path: u32, row: u32) -> String {
    format!("{path:03}{row:03}")
}

/// Extract the row component of a concatenated path/row identifier.
/// Returns `None` if the identifier is not in the six-digit form.
pub fn row_of(identifier: &str) -> Option<u32> {
    if identifier.len() != 6 || !identifier.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    identifier[3..].parse().ok()
}
