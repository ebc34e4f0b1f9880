//! Asset store infrastructure: the on-disk asset home.
//!
//! Layout under the home directory:
//!
//! ```text
//! <home>/static/              extracted bundle, served read-only
//! <home>/static_version.rs    version record
//! <home>/.static-staging-*/   extraction in progress
//! <home>/.static-old-*/       previous tree while it is swapped out
//! ```

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::application::ports::AssetRepository;
use crate::domain::version::{parse_version_record, render_version_record};
use crate::domain::{ENTRY_HTML, VERSION_RECORD_FILE, VersionRecord};
use crate::infra::archive::extract_subtree;

/// Name of the asset directory inside the home.
pub const STATIC_DIR: &str = "static";

/// Filesystem-backed [`AssetRepository`].
///
/// Replacement is serialized by an in-process lock and staged in a sibling
/// directory, so readers see either the old tree or the new one.
#[derive(Debug)]
pub struct AssetStore {
    home: PathBuf,
    write_lock: Mutex<()>,
}

impl AssetStore {
    #[must_use]
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    fn version_record_path(&self) -> PathBuf {
        self.home.join(VERSION_RECORD_FILE)
    }

    /// Move `staged` into the static directory, keeping the previous tree
    /// until the new one is in place.
    fn swap_in(&self, staged: &Path) -> Result<()> {
        let target = self.static_dir();
        if !target.exists() {
            return fs::rename(staged, &target)
                .with_context(|| format!("moving staged assets to {}", target.display()));
        }

        let old = tempfile::Builder::new()
            .prefix(".static-old-")
            .tempdir_in(&self.home)
            .context("creating backup directory")?;
        let backup = old.path().join(STATIC_DIR);
        fs::rename(&target, &backup)
            .with_context(|| format!("moving {} aside", target.display()))?;

        if let Err(e) = fs::rename(staged, &target) {
            if let Err(restore) = fs::rename(&backup, &target) {
                tracing::error!(error = %restore, "failed to restore previous assets");
            }
            return Err(e)
                .with_context(|| format!("moving staged assets to {}", target.display()));
        }
        // `old` is removed with the previous tree on drop.
        Ok(())
    }
}

impl AssetRepository for AssetStore {
    fn static_dir(&self) -> PathBuf {
        self.home.join(STATIC_DIR)
    }

    fn has_static_dir(&self) -> bool {
        self.static_dir().is_dir()
    }

    fn has_entry_html(&self) -> bool {
        self.static_dir().join(ENTRY_HTML).is_file()
    }

    fn file_count(&self) -> usize {
        count_entries(&self.static_dir())
    }

    fn read_entry_html(&self) -> Result<String> {
        let path = self.static_dir().join(ENTRY_HTML);
        fs::read_to_string(&path).with_context(|| format!("cannot read {}", path.display()))
    }

    fn replace_from_archive(&self, archive: &mut dyn Read, prefix: &str) -> Result<usize> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("asset store lock poisoned"))?;

        fs::create_dir_all(&self.home)
            .with_context(|| format!("cannot create {}", self.home.display()))?;
        let staging = tempfile::Builder::new()
            .prefix(".static-staging-")
            .tempdir_in(&self.home)
            .context("creating staging directory")?;

        let files = extract_subtree(archive, prefix, staging.path())?;
        self.swap_in(staging.path())?;
        tracing::debug!(dir = %self.static_dir().display(), files, "asset directory swapped");
        Ok(files)
    }

    fn write_version_record(&self, record: &VersionRecord) -> Result<()> {
        fs::create_dir_all(&self.home)
            .with_context(|| format!("cannot create {}", self.home.display()))?;
        let path = self.version_record_path();
        fs::write(&path, render_version_record(&record.version, &record.package))
            .with_context(|| format!("cannot write {}", path.display()))
    }

    fn read_version_record(&self) -> Option<VersionRecord> {
        let path = self.version_record_path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "no version record");
                return None;
            }
        };
        let record = parse_version_record(&text);
        if record.is_none() {
            tracing::warn!(path = %path.display(), "unparsable version record");
        }
        record
    }
}

fn count_entries(dir: &Path) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .map(|entry| {
            let path = entry.path();
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                1 + count_entries(&path)
            } else {
                1
            }
        })
        .sum()
}
