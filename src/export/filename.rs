/// Characters rejected in file names on at least one supported platform
pub const ILLEGAL_FILENAME_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Replace every illegal filename character with `-`.
///
/// Idempotent, so a title that already went through here (or already carries
/// its extension) comes back unchanged. Length, reserved device names such as
/// `CON`, and uniqueness are not handled: two notes that sanitize to the same
/// name write to the same file.
pub fn sanitize_filename(title: &str) -> String {
    title
        .chars()
        .map(|c| if ILLEGAL_FILENAME_CHARS.contains(&c) { '-' } else { c })
        .collect()
}

/// Output file name for a note: sanitized title plus `.{extension}`
pub fn note_file_name(title: &str, extension: &str) -> String {
    format!("{}.{}", sanitize_filename(title), extension)
}
