//! Span to line/column conversion.

use mallard_ir::Span;

/// 1-based line and column of a byte offset in `source`.
///
/// Column counts characters, not bytes, so diagnostics stay readable for
/// sources with non-ASCII identifiers or string contents.
pub fn line_col(source: &str, offset: u32) -> (u32, u32) {
    let offset = (offset as usize).min(source.len());
    let mut line = 1u32;
    let mut line_start = 0usize;

    for (idx, byte) in source.as_bytes().iter().enumerate().take(offset) {
        if *byte == b'\n' {
            line += 1;
            line_start = idx + 1;
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "a single line cannot exceed u32::MAX characters"
    )]
    let col = source[line_start..offset].chars().count() as u32 + 1;
    (line, col)
}

/// Line and column of a span's start.
pub fn span_line_col(source: &str, span: Span) -> (u32, u32) {
    line_col(source, span.start)
}

/// The full text of the line containing `offset`, without its newline.
pub fn line_text(source: &str, offset: u32) -> &str {
    let offset = (offset as usize).min(source.len());
    let start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = source[start..]
        .find('\n')
        .map_or(source.len(), |i| start + i);
    &source[start..end]
}
