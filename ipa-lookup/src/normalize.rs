//! Canonical transcription form

/// Formatting characters stripped from every extracted transcription
pub const FORMATTING_CHARS: [char; 5] = ['/', '[', ']', '.', '\\'];

/// Strip slashes, brackets, dots and backslashes
///
/// Total and idempotent. All other characters, including whitespace and
/// IPA stress marks, pass through unchanged.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| !FORMATTING_CHARS.contains(c)).collect()
}
