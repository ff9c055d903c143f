use crate::error::Result;
use crate::naming::bare_name;
use std::fs::{self, File};
use std::path::Path;
use time::OffsetDateTime;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

#[derive(Clone, Debug, Default)]
pub struct BundleOptions {
    /// When true, every entry carries the ZIP epoch instead of the source mtime.
    pub deterministic: bool,
    /// Deflate level (0-9); `None` uses the library default.
    pub compression_level: Option<i64>,
}

fn mode_from(_md: &fs::Metadata) -> u32 {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        _md.permissions().mode()
    }
    #[cfg(not(unix))]
    {
        0o100644
    }
}

fn entry_time(md: &fs::Metadata, deterministic: bool) -> DateTime {
    if deterministic {
        return DateTime::default();
    }
    md.modified()
        .ok()
        .map(OffsetDateTime::from)
        .and_then(|t| DateTime::try_from(t).ok())
        .unwrap_or_default()
}

/// Writes `members` into a fresh deflate archive at `out`, each under its bare file name.
///
/// The archive is staged in a temporary file next to `out` and moved into place
/// once complete, replacing any existing archive. Returns the entry names in order.
pub fn write_bundle(out: &Path, members: &[&Path], opts: &BundleOptions) -> Result<Vec<String>> {
    let dir = match out.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".eddpack-")
        .suffix(".zip.tmp")
        .tempfile_in(dir)?;

    let mut names = Vec::with_capacity(members.len());
    {
        let mut zw = ZipWriter::new(tmp.as_file_mut());
        for src in members {
            let md = fs::metadata(src)?;
            let name = bare_name(src);
            let options = SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(opts.compression_level)
                .last_modified_time(entry_time(&md, opts.deterministic))
                .unix_permissions(mode_from(&md))
                .large_file(md.len() >= u32::MAX as u64);
            zw.start_file(name.as_str(), options)?;
            let mut f = File::open(src)?;
            std::io::copy(&mut f, &mut zw)?;
            names.push(name);
        }
        zw.finish()?;
    }
    tmp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }

    tmp.persist(out).map_err(|e| e.error)?;
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn fixture(dir: &Path, name: &str, body: &[u8]) -> std::path::PathBuf {
        let p = dir.join(name);
        fs::write(&p, body).unwrap();
        p
    }

    #[test]
    fn entries_are_flat_deflated_and_ordered() {
        let tmp = tempfile::tempdir().unwrap();
        let d = tmp.path();
        let a = fixture(d, "A_Chemistry2e.csv", b"sys_loc_code,chemical_name\nMW-1,Benzene\n");
        let b = fixture(d, "A_Sample2e.csv", b"sys_sample_code\nMW-1-2016\n");
        let c = fixture(d, "A_Header.xml", b"<Header/>");
        let out = d.join("A_Archive.zip");

        let names = write_bundle(&out, &[&a, &b, &c], &BundleOptions::default()).unwrap();
        assert_eq!(names, ["A_Chemistry2e.csv", "A_Sample2e.csv", "A_Header.xml"]);

        let mut zip = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        assert_eq!(zip.len(), 3);
        for (i, src) in [&a, &b, &c].iter().enumerate() {
            let mut entry = zip.by_index(i).unwrap();
            assert_eq!(entry.name(), names[i]);
            assert_eq!(entry.compression(), CompressionMethod::Deflated);
            let mut body = Vec::new();
            entry.read_to_end(&mut body).unwrap();
            assert_eq!(body, fs::read(src).unwrap());
        }
    }

    #[test]
    fn deterministic_bundles_are_byte_identical() {
        let tmp = tempfile::tempdir().unwrap();
        let d = tmp.path();
        let a = fixture(d, "x.csv", b"1,2,3\n");
        let opts = BundleOptions {
            deterministic: true,
            compression_level: Some(9),
        };

        let first = d.join("first.zip");
        let second = d.join("second.zip");
        write_bundle(&first, &[&a], &opts).unwrap();
        write_bundle(&second, &[&a], &opts).unwrap();
        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn existing_archive_is_replaced() {
        let tmp = tempfile::tempdir().unwrap();
        let d = tmp.path();
        let a = fixture(d, "x.csv", b"fresh");
        let out = fixture(d, "x.zip", b"not a zip at all");

        write_bundle(&out, &[&a], &BundleOptions::default()).unwrap();
        let zip = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        assert_eq!(zip.len(), 1);

        let leftovers: Vec<_> = fs::read_dir(d)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".zip.tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn entries_record_source_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let d = tmp.path();
        let a = fixture(d, "A_Chemistry2e.csv", b"chem");
        let b = fixture(d, "A_Sample2e.csv", b"sample");
        fs::set_permissions(&a, fs::Permissions::from_mode(0o640)).unwrap();
        fs::set_permissions(&b, fs::Permissions::from_mode(0o600)).unwrap();
        let out = d.join("A_Archive.zip");

        write_bundle(&out, &[&a, &b], &BundleOptions::default()).unwrap();
        let mut zip = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        for (i, src) in [&a, &b].iter().enumerate() {
            let want = fs::metadata(src).unwrap().permissions().mode() & 0o777;
            let got = zip.by_index(i).unwrap().unix_mode().unwrap() & 0o777;
            assert_eq!(got, want);
        }
    }

    #[test]
    fn missing_member_leaves_no_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let d = tmp.path();
        let gone = d.join("gone.csv");
        let out = d.join("gone.zip");

        assert!(write_bundle(&out, &[&gone], &BundleOptions::default()).is_err());
        assert!(!out.exists());
    }
}
