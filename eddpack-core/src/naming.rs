// eddpack_core/src/naming.rs
use std::path::{Path, PathBuf};

/// Header document shipped with every EDD bundle.
pub const TEMPLATE_NAME: &str = "12-013-053-26W4M.AGAT.17E232483.Header.xml";
pub const CHEMISTRY_SUFFIX: &str = "Chemistry2e.csv";
pub const SAMPLE_SUFFIX: &str = "Sample2e.csv";
pub const HEADER_SUFFIX: &str = "Header.xml";
pub const ARCHIVE_SUFFIX: &str = "Archive.zip";

/// File names that tie a Chemistry export to its Sample export, header copy and archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamingScheme {
    pub template: String,
    pub chemistry_suffix: String,
    pub sample_suffix: String,
    pub header_suffix: String,
    pub archive_suffix: String,
}

impl Default for NamingScheme {
    fn default() -> Self {
        Self {
            template: TEMPLATE_NAME.to_string(),
            chemistry_suffix: CHEMISTRY_SUFFIX.to_string(),
            sample_suffix: SAMPLE_SUFFIX.to_string(),
            header_suffix: HEADER_SUFFIX.to_string(),
            archive_suffix: ARCHIVE_SUFFIX.to_string(),
        }
    }
}

impl NamingScheme {
    pub fn with_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Default::default()
        }
    }

    /// Strips exactly one trailing chemistry suffix. `None` when `file_name` doesn't carry it.
    pub fn base_name<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        file_name.strip_suffix(self.chemistry_suffix.as_str())
    }

    pub fn template_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.template)
    }

    pub fn sample_name(&self, base: &str) -> String {
        format!("{base}{}", self.sample_suffix)
    }

    pub fn header_name(&self, base: &str) -> String {
        format!("{base}{}", self.header_suffix)
    }

    pub fn archive_name(&self, base: &str) -> String {
        format!("{base}{}", self.archive_suffix)
    }
}

/// A Chemistry export together with its matching Sample export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pair {
    pub base: String,
    pub chemistry: PathBuf,
    pub sample: PathBuf,
}

impl Pair {
    pub fn header_path(&self, dir: &Path, scheme: &NamingScheme) -> PathBuf {
        dir.join(scheme.header_name(&self.base))
    }

    pub fn archive_path(&self, dir: &Path, scheme: &NamingScheme) -> PathBuf {
        dir.join(scheme.archive_name(&self.base))
    }
}

/// Bare file name of `path`, lossily converted; empty if the path has none.
pub fn bare_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
