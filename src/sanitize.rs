//! Folder name sanitization
//!
//! Organization names arrive as free-form user input and become Drive folder
//! names. Characters reserved by common file-naming schemes are stripped,
//! along with ASCII control characters, before the name reaches the API.

/// Characters not allowed in folder names
const RESERVED: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Strip reserved and control characters from a folder name and trim
/// surrounding whitespace.
///
/// Never fails; the worst case for hostile input is an empty string.
pub fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !RESERVED.contains(c) && !c.is_ascii_control())
        .collect();

    cleaned.trim().to_string()
}
