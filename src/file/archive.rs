//! ZIP packaging for downloads.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::Result;

/// Media type of packed archives.
pub const ZIP_MEDIA_TYPE: &str = "application/zip";

/// Pack a single file into an in-memory ZIP archive.
///
/// The archive holds exactly one deflated entry named `name` with
/// `content` as its data. Timestamps inside the archive are not
/// meaningful.
pub fn pack(name: &str, content: &[u8]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(content.len() + 128)));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    writer.start_file(name, options)?;
    writer.write_all(content)?;

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

/// Download name presented for a packed file.
pub fn archive_name(name: &str) -> String {
    format!("{name}.zip")
}
