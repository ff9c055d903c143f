use std::path::PathBuf;

use eddpack_core::error::{EddError, Result};
use eddpack_core::naming::bare_name;
use eddpack_core::{
    ArchiveOptions, NamingScheme, Skip, SkipReason, discover, list_members, run, verify_pair,
};

fn describe_skip(skip: &Skip) -> String {
    match &skip.reason {
        SkipReason::MissingSample { expected } => format!("no {}", bare_name(expected)),
        SkipReason::BaseNameCollision { with } => format!("collides with {}", bare_name(with)),
    }
}

pub fn handle_bundle(
    dir: PathBuf,
    template: String,
    deterministic: bool,
    level: Option<i64>,
    dry_run: bool,
) -> Result<()> {
    let opts = ArchiveOptions {
        naming: NamingScheme::with_template(template),
        deterministic,
        compression_level: level,
        dry_run,
    };
    let summary = run(&dir, &opts)?;
    let verb = if summary.dry_run { "would bundle" } else { "bundled" };
    eprintln!(
        "bundle: {} {} pair(s), skipped {}",
        verb,
        summary.bundled.len(),
        summary.skipped.len()
    );
    Ok(())
}

pub fn handle_scan(dir: PathBuf, template: String) -> Result<()> {
    let scheme = NamingScheme::with_template(template);
    let template_path = scheme.template_path(&dir);
    if !template_path.is_file() {
        tracing::warn!(path = %template_path.display(), "header template not found");
    }
    let found = discover(&dir, &scheme)?;
    for p in &found.pairs {
        println!(
            "pair  {:<40}  {}  {}",
            p.base,
            bare_name(&p.chemistry),
            bare_name(&p.sample)
        );
    }
    for s in &found.skipped {
        println!("skip  {:<40}  {}", bare_name(&s.chemistry), describe_skip(s));
    }
    Ok(())
}

pub fn handle_list(archive: PathBuf) -> Result<()> {
    for r in list_members(&archive)? {
        println!(
            "{:<48}  {:>10}  {:>10}  {:<8}  {:08x}",
            r.name, r.size, r.compressed_size, r.method, r.crc32
        );
    }
    Ok(())
}

pub fn handle_verify(dir: PathBuf, template: String) -> Result<()> {
    let scheme = NamingScheme::with_template(template);
    let template_path = scheme.template_path(&dir);
    if !template_path.is_file() {
        return Err(EddError::MissingTemplate {
            path: template_path,
        });
    }

    let found = discover(&dir, &scheme)?;
    let mut failed = 0usize;
    for pair in &found.pairs {
        match verify_pair(&dir, pair, &scheme) {
            Ok(()) => tracing::info!("verify: {} OK", scheme.archive_name(&pair.base)),
            Err(e) => {
                failed += 1;
                tracing::error!("verify: {}", crate::error_chain(&e));
            }
        }
    }
    if failed > 0 {
        return Err(EddError::Verify(format!(
            "{failed} of {} archive(s) failed",
            found.pairs.len()
        )));
    }
    eprintln!("verify: OK ({} archive(s))", found.pairs.len());
    Ok(())
}
