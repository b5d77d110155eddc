//! Caption truncation

/// The maximum number of characters that fit on the cat image.
pub const MAX_MESSAGE_LENGTH: usize = 40;

/// Truncate a message to fit on the cat image.
pub fn truncate(message: &str) -> String {
    truncate_to(message, MAX_MESSAGE_LENGTH)
}

/// Truncate `message` to at most `max_chars` characters, backing up to the
/// last space and appending an ellipsis.
///
/// Counts characters, not bytes. A prefix without any space is kept whole,
/// all `max_chars` characters plus the ellipsis. The first version of the
/// add-on dropped the last character of such a prefix instead.
pub fn truncate_to(message: &str, max_chars: usize) -> String {
    let cut = match message.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => byte_idx,
        None => return message.to_string(),
    };

    let prefix = &message[..cut];
    let kept = match prefix.rfind(' ') {
        Some(space) => &prefix[..space],
        None => prefix,
    };

    format!("{}...", kept)
}
