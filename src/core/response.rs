//! Message chunking utilities
//!
//! Discord caps message content at 2000 characters; notes can be longer.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;

/// Chunk text for message content (2000 character limit)
pub fn chunk_for_message(text: &str) -> Vec<String> {
    chunk_text(text, MESSAGE_LIMIT)
}

/// Split text into pieces of at most `max_size` bytes.
///
/// Prefers splitting at line boundaries; a single line longer than the limit
/// is split at character boundaries, never mid-character.
pub fn chunk_text(text: &str, max_size: usize) -> Vec<String> {
    if text.len() <= max_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let line_with_newline = format!("{line}\n");
        if current.len() + line_with_newline.len() > max_size {
            if !current.is_empty() {
                chunks.push(current.trim_end().to_string());
                current = String::new();
            }
            if line_with_newline.len() > max_size {
                chunks.extend(split_long_line(line, max_size));
            } else {
                current = line_with_newline;
            }
        } else {
            current.push_str(&line_with_newline);
        }
    }
    if !current.is_empty() {
        chunks.push(current.trim_end().to_string());
    }
    chunks
}

fn split_long_line(line: &str, max_size: usize) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();

    for ch in line.chars() {
        if current.len() + ch.len_utf8() > max_size && !current.is_empty() {
            result.push(current);
            current = String::new();
        }
        current.push(ch);
    }

    if !current.is_empty() {
        result.push(current);
    }
    result
}
