//! Archive infrastructure: gzip tar subtree extraction.

use std::fs;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use flate2::read::GzDecoder;

/// Extract the entries of the gzip tar `archive` that live under `prefix`
/// into `dest`, with `prefix` stripped. Returns the number of files written.
///
/// Directories are recreated, regular files are written, and everything
/// else (symlinks, devices, entries escaping `dest`) is skipped.
///
/// # Errors
///
/// Returns an error if the archive is not a valid gzip tar or a file cannot
/// be written.
pub fn extract_subtree(archive: impl Read, prefix: &str, dest: &Path) -> Result<usize> {
    let prefix = Path::new(prefix);
    let mut tar = tar::Archive::new(GzDecoder::new(archive));
    let mut files = 0;

    for entry in tar.entries().context("reading archive")? {
        let mut entry = entry.context("reading archive entry")?;
        let path = entry.path().context("decoding entry path")?.into_owned();

        let Ok(relative) = path.strip_prefix(prefix) else {
            continue;
        };
        if relative.as_os_str().is_empty() {
            continue;
        }
        let Some(relative) = contained(relative) else {
            tracing::debug!(path = %path.display(), "skipping entry outside target");
            continue;
        };

        let kind = entry.header().entry_type();
        let target = dest.join(&relative);
        if kind.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("creating {}", target.display()))?;
        } else if kind.is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            let mut out = fs::File::create(&target)
                .with_context(|| format!("creating {}", target.display()))?;
            io::copy(&mut entry, &mut out)
                .with_context(|| format!("writing {}", target.display()))?;
            files += 1;
        } else {
            tracing::debug!(path = %path.display(), ?kind, "skipping non-regular entry");
        }
    }

    Ok(files)
}

/// `path` as a relative path made of normal components only.
fn contained(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if out.as_os_str().is_empty() { None } else { Some(out) }
}
