use crate::error::{EddError, Result};
use crate::naming::{NamingScheme, Pair, bare_name};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use zip::ZipArchive;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberRow {
    pub name: String,
    pub size: u64,
    pub compressed_size: u64,
    pub method: String,
    pub crc32: u32,
}

/// Entries of `archive` in stored order.
pub fn list_members(archive: &Path) -> Result<Vec<MemberRow>> {
    let mut zip = ZipArchive::new(BufReader::new(File::open(archive)?))?;
    let mut rows = Vec::with_capacity(zip.len());
    for i in 0..zip.len() {
        let e = zip.by_index_raw(i)?;
        rows.push(MemberRow {
            name: e.name().to_string(),
            size: e.size(),
            compressed_size: e.compressed_size(),
            method: format!("{:?}", e.compression()),
            crc32: e.crc32(),
        });
    }
    Ok(rows)
}

/// Checks that the archive of `pair` holds exactly its Chemistry file, Sample file
/// and header copy, flat and in that order, with contents equal to the files in `dir`.
pub fn verify_pair(dir: &Path, pair: &Pair, scheme: &NamingScheme) -> Result<()> {
    let header = pair.header_path(dir, scheme);
    let archive = pair.archive_path(dir, scheme);
    if !archive.is_file() {
        return Err(EddError::Verify(format!(
            "archive missing: {}",
            archive.display()
        )));
    }

    let expected = [&pair.chemistry, &pair.sample, &header];
    let mut zip = ZipArchive::new(BufReader::new(File::open(&archive)?))?;
    if zip.len() != expected.len() {
        return Err(EddError::Verify(format!(
            "{}: expected {} entries, found {}",
            archive.display(),
            expected.len(),
            zip.len()
        )));
    }

    for (i, src) in expected.iter().enumerate() {
        let want = bare_name(src);
        let mut entry = zip.by_index(i)?;
        if entry.name() != want {
            return Err(EddError::Verify(format!(
                "{}: entry #{i} is '{}', expected '{want}'",
                archive.display(),
                entry.name()
            )));
        }
        let mut packed = Vec::new();
        entry.read_to_end(&mut packed)?;
        let on_disk = std::fs::read(src)?;
        if packed != on_disk {
            return Err(EddError::Verify(format!(
                "{}: entry '{want}' differs from {}",
                archive.display(),
                src.display()
            )));
        }
    }

    let template = scheme.template_path(dir);
    if std::fs::read(&header)? != std::fs::read(&template)? {
        return Err(EddError::Verify(format!(
            "{} differs from template {}",
            header.display(),
            template.display()
        )));
    }
    Ok(())
}
