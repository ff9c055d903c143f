use crate::error::{EddError, Result};
use crate::header::same_file;
use crate::naming::{NamingScheme, Pair};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Why a Chemistry export produced no bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    MissingSample { expected: PathBuf },
    /// Outputs would alias an earlier pair's (names differing only in case on a
    /// case-insensitive filesystem).
    BaseNameCollision { with: PathBuf },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skip {
    pub chemistry: PathBuf,
    pub reason: SkipReason,
}

/// Result of one scan: pairs ready to bundle and the candidates that were passed over.
#[derive(Clone, Debug, Default)]
pub struct Discovery {
    pub pairs: Vec<Pair>,
    pub skipped: Vec<Skip>,
}

/// Chemistry exports directly inside `dir`, sorted by file name.
pub fn chemistry_files(dir: &Path, scheme: &NamingScheme) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for e in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let e = match e {
            Ok(e) => e,
            Err(err) if err.depth() > 0 => {
                tracing::debug!(error = %err, "skipping unreadable directory entry");
                continue;
            }
            Err(err) => return Err(std::io::Error::new(std::io::ErrorKind::Other, err).into()),
        };
        if !e.file_type().is_file() {
            continue;
        }
        let Some(name) = e.file_name().to_str() else {
            tracing::debug!(path = %e.path().display(), "skipping non UTF-8 file name");
            continue;
        };
        if scheme.base_name(name).is_some() {
            found.push(e.into_path());
        }
    }
    Ok(found)
}

/// Scans `dir` and pairs every Chemistry export with its Sample export.
///
/// Two candidates collide only when their base names fold (ASCII, case-insensitive)
/// to the same key and their Sample exports resolve to the same file, which is what
/// a case-insensitive filesystem does to names differing only in case. The first
/// candidate in sorted order wins.
pub fn discover(dir: &Path, scheme: &NamingScheme) -> Result<Discovery> {
    if !dir.is_dir() {
        return Err(EddError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut out = Discovery::default();
    let mut claimed: HashMap<String, Vec<usize>> = HashMap::new();

    for chemistry in chemistry_files(dir, scheme)? {
        let base = chemistry
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| scheme.base_name(n))
            .unwrap_or_default()
            .to_string();

        let sample = dir.join(scheme.sample_name(&base));
        if !sample.is_file() {
            out.skipped.push(Skip {
                chemistry,
                reason: SkipReason::MissingSample { expected: sample },
            });
            continue;
        }

        let key = base.to_ascii_lowercase();
        let earlier = claimed.get(&key).and_then(|idx| {
            idx.iter()
                .map(|&i| &out.pairs[i])
                .find(|p| p.base == base || same_file(&p.sample, &sample))
        });
        if let Some(first) = earlier {
            out.skipped.push(Skip {
                reason: SkipReason::BaseNameCollision {
                    with: first.chemistry.clone(),
                },
                chemistry,
            });
            continue;
        }

        claimed.entry(key).or_default().push(out.pairs.len());
        out.pairs.push(Pair {
            base,
            chemistry,
            sample,
        });
    }
    Ok(out)
}
