use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::comment::{HeaderFormat, HeaderReadResult, detect_line_separator};
use crate::error::{HeaderGuardError, Result};

/// Insert `header` into `source`, which has no header comment.
///
/// The header goes at the format's insertion point, followed by one blank line. Whatever
/// follows the insertion point is kept byte for byte, leading whitespace included.
#[must_use]
pub fn insert_header(source: &str, format: HeaderFormat, header: &[String]) -> String {
    let separator = detect_line_separator(source);
    let point = format.insertion_point(source);
    let (prologue, rest) = source.split_at(point);
    let comment = format.write_header_comment(header, separator);

    let mut out = String::with_capacity(source.len() + comment.len() + 3 * separator.len());
    out.push_str(prologue);
    if !prologue.is_empty() && !prologue.ends_with('\n') {
        out.push_str(separator);
    }
    out.push_str(&comment);
    out.push_str(separator);
    if !rest.is_empty() {
        out.push_str(separator);
        out.push_str(rest);
    }
    out
}

/// Replace the header span found by `read` with `header`.
#[must_use]
pub fn replace_header(
    source: &str,
    read: &HeaderReadResult,
    format: HeaderFormat,
    header: &[String],
) -> String {
    let comment = format.write_header_comment(header, read.separator);
    let mut out = String::with_capacity(source.len() - (read.end - read.start) + comment.len());
    out.push_str(&source[..read.start]);
    out.push_str(&comment);
    out.push_str(&source[read.end..]);
    out
}

/// Write `content` to `path` through a temporary file in the same directory.
///
/// The original file is either fully replaced or left untouched, and keeps its
/// permissions.
///
/// # Errors
/// Returns [`HeaderGuardError::FileWrite`] when any step fails.
pub fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let to_write_error = |source: std::io::Error| HeaderGuardError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let permissions = std::fs::metadata(path).map_err(to_write_error)?.permissions();

    let mut temp = NamedTempFile::new_in(dir).map_err(to_write_error)?;
    temp.write_all(content.as_bytes()).map_err(to_write_error)?;
    temp.as_file().sync_all().map_err(to_write_error)?;
    std::fs::set_permissions(temp.path(), permissions).map_err(to_write_error)?;
    temp.persist(path).map_err(|e| to_write_error(e.error))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "rewrote file");
    Ok(())
}

#[cfg(test)]
#[path = "splice_tests.rs"]
mod tests;
