//! Parser for `otool -L` output.
//!
//! Format (version 1):
//! ```text
//! /usr/lib/libz.1.dylib:
//! 	/usr/lib/libz.1.dylib (compatibility version 1.0.0, current version 1.2.12)
//! 	/usr/lib/libSystem.B.dylib (compatibility version 1.0.0, current version 1319.0.0)
//! ```
//!
//! Only lines starting with a tab carry a library path. The path is the text
//! between the tab and the first space; the parenthesised version metadata is
//! ignored. Header lines (the target's own name, or one header per slice of a
//! universal binary) do not start with a tab and are skipped.

/// Version of the line contract implemented by [`parse_listing`].
pub const FORMAT_VERSION: u32 = 1;

/// Marker that starts every dependency line.
const CONTINUATION: char = '\t';

/// Extracts every library path from `otool -L` standard output, in line order.
///
/// Duplicates are kept. Lines that do not match the continuation shape are
/// dropped without error.
pub fn parse_listing(output: &str) -> Vec<String> {
    output.lines().filter_map(parse_line).map(str::to_string).collect()
}

/// Parses one line, returning the library path if it is a continuation line.
pub fn parse_line(line: &str) -> Option<&str> {
    let payload = line.strip_prefix(CONTINUATION)?;
    let token = payload.split(' ').next().unwrap_or("");
    let path = token.strip_prefix('(').unwrap_or(token);

    if path.is_empty() {
        return None;
    }
    Some(path)
}
