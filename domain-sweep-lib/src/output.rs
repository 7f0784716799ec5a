//! Output artifact writing.
//!
//! The artifact is deliberately plain: one domain per line, `\n`-terminated,
//! no header, no WHOIS text, no summary.

use crate::error::SweepError;
use crate::types::CandidateDomain;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write `domains` to `path`, truncating any existing file.
///
/// # Errors
///
/// Returns `SweepError::FileError` if the file cannot be created or written.
pub fn write_available<P: AsRef<Path>>(path: P, domains: &[CandidateDomain]) -> Result<(), SweepError> {
    let path = path.as_ref();
    let to_file_error = |e: std::io::Error| SweepError::file_error(path.to_string_lossy(), e.to_string());

    let file = File::create(path).map_err(to_file_error)?;
    let mut writer = BufWriter::new(file);
    for domain in domains {
        writer.write_all(domain.as_str().as_bytes()).map_err(to_file_error)?;
        writer.write_all(b"\n").map_err(to_file_error)?;
    }
    writer.flush().map_err(to_file_error)?;

    tracing::info!(path = %path.display(), count = domains.len(), "wrote available domains");
    Ok(())
}
