use crate::error::Result;
use std::fs::{self, File};
use std::path::Path;

/// Copies the header template to `dest`, overwriting it.
///
/// Permissions and modification time follow the template. Returns the number of
/// bytes copied; copying the template onto itself is a no-op.
pub fn copy_header(template: &Path, dest: &Path) -> Result<u64> {
    let meta = fs::metadata(template)?;
    if same_file(template, dest) {
        tracing::debug!(path = %dest.display(), "header copy is the template itself");
        return Ok(meta.len());
    }

    let n = fs::copy(template, dest)?;
    if let Ok(mtime) = meta.modified() {
        // Times only need ownership, and the copy may already be read-only.
        File::open(dest)?.set_modified(mtime)?;
    }
    Ok(n)
}

/// True when both paths resolve to the same existing file.
pub(crate) fn same_file(a: &Path, b: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        if let (Ok(a), Ok(b)) = (fs::metadata(a), fs::metadata(b)) {
            return a.dev() == b.dev() && a.ino() == b.ino();
        }
        false
    }
    #[cfg(not(unix))]
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
