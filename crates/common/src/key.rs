//! Rendering of raw row keys for logs and error messages.
//!
//! Row keys are arbitrary bytes. They are shown with `escape_ascii`, and the
//! empty key, which marks a table boundary, is shown by the role it plays.

pub fn display_key(key: &[u8]) -> String {
    key.escape_ascii().to_string()
}

/// Renders a range start; the empty key is the start of the table.
pub fn display_start(key: &[u8]) -> String {
    if key.is_empty() {
        "<start>".to_string()
    } else {
        display_key(key)
    }
}

/// Renders a range stop; the empty key is the end of the table.
pub fn display_stop(key: &[u8]) -> String {
    if key.is_empty() {
        "<end>".to_string()
    } else {
        display_key(key)
    }
}

pub fn display_last(key: &Option<Vec<u8>>) -> String {
    match key {
        Some(key) => display_key(key),
        None => "<none>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_escapes_non_ascii() {
        assert_eq!(display_key(b"beam\x00key\xff"), "beam\\x00key\\xff");
    }

    #[test]
    fn test_display_boundaries() {
        assert_eq!(display_start(b""), "<start>");
        assert_eq!(display_stop(b""), "<end>");
        assert_eq!(display_start(b"a"), "a");
        assert_eq!(display_last(&None), "<none>");
        assert_eq!(display_last(&Some(b"k".to_vec())), "k");
    }
}
