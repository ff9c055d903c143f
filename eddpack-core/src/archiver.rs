use crate::bundle::{BundleOptions, write_bundle};
use crate::discover::{Skip, SkipReason, discover};
use crate::error::{EddError, Result};
use crate::header::copy_header;
use crate::naming::{NamingScheme, Pair, bare_name};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default)]
pub struct ArchiveOptions {
    pub naming: NamingScheme,
    /// Zero entry timestamps so repeated runs produce identical archives.
    pub deterministic: bool,
    pub compression_level: Option<i64>,
    /// Check, discover and report without writing anything.
    pub dry_run: bool,
}

impl ArchiveOptions {
    fn bundle_options(&self) -> BundleOptions {
        BundleOptions {
            deterministic: self.deterministic,
            compression_level: self.compression_level,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleOutcome {
    pub base: String,
    pub header: PathBuf,
    pub archive: PathBuf,
    pub members: Vec<String>,
}

#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub bundled: Vec<BundleOutcome>,
    pub skipped: Vec<Skip>,
    pub dry_run: bool,
}

/// Bundles every Chemistry/Sample pair in `dir` with a copy of the header template.
///
/// Fails up front with [`EddError::MissingTemplate`] before anything is scanned or
/// written. Unmatched Chemistry files are skipped with a warning; the first I/O
/// failure while producing a pair aborts the run.
pub fn run(dir: &Path, opts: &ArchiveOptions) -> Result<RunSummary> {
    if !dir.is_dir() {
        return Err(EddError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    let scheme = &opts.naming;
    let template = scheme.template_path(dir);
    if !template.is_file() {
        return Err(EddError::MissingTemplate { path: template });
    }

    let found = discover(dir, scheme)?;
    for skip in &found.skipped {
        report_skip(skip);
    }

    let mut summary = RunSummary {
        bundled: Vec::with_capacity(found.pairs.len()),
        skipped: found.skipped,
        dry_run: opts.dry_run,
    };
    for pair in &found.pairs {
        let outcome = if opts.dry_run {
            plan_pair(dir, pair, scheme)
        } else {
            bundle_pair(dir, pair, &template, opts)?
        };
        summary.bundled.push(outcome);
    }

    tracing::info!(
        dir = %dir.display(),
        bundled = summary.bundled.len(),
        skipped = summary.skipped.len(),
        dry_run = opts.dry_run,
        "run complete"
    );
    Ok(summary)
}

fn report_skip(skip: &Skip) {
    let name = bare_name(&skip.chemistry);
    match &skip.reason {
        SkipReason::MissingSample { expected } => tracing::warn!(
            expected = %expected.display(),
            "No matching Sample file for {name}"
        ),
        SkipReason::BaseNameCollision { with } => tracing::warn!(
            with = %with.display(),
            "Base name of {name} collides with an earlier Chemistry file; skipping"
        ),
    }
}

fn plan_pair(dir: &Path, pair: &Pair, scheme: &NamingScheme) -> BundleOutcome {
    let header = pair.header_path(dir, scheme);
    let archive = pair.archive_path(dir, scheme);
    let members = vec![
        bare_name(&pair.chemistry),
        bare_name(&pair.sample),
        bare_name(&header),
    ];
    tracing::info!(
        header = %bare_name(&header),
        archive = %bare_name(&archive),
        "would bundle {}",
        members.join(", ")
    );
    BundleOutcome {
        base: pair.base.clone(),
        header,
        archive,
        members,
    }
}

fn bundle_pair(
    dir: &Path,
    pair: &Pair,
    template: &Path,
    opts: &ArchiveOptions,
) -> Result<BundleOutcome> {
    let scheme = &opts.naming;
    let header = pair.header_path(dir, scheme);
    copy_header(template, &header).map_err(|e| EddError::in_pair(&pair.base, &header, e))?;
    tracing::info!("Created header: {}", bare_name(&header));

    let archive = pair.archive_path(dir, scheme);
    let members = write_bundle(
        &archive,
        &[&pair.chemistry, &pair.sample, &header],
        &opts.bundle_options(),
    )
    .map_err(|e| EddError::in_pair(&pair.base, &archive, e))?;
    tracing::info!("Created archive: {}", bare_name(&archive));
    for m in &members {
        tracing::info!("  - Contains: {m}");
    }

    Ok(BundleOutcome {
        base: pair.base.clone(),
        header,
        archive,
        members,
    })
}
