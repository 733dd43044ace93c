//! Per-website pool file generation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::FpmConfig;
use crate::config::sites::WebsiteDescriptor;
use crate::error::{Error, Result};
use crate::pool::render_pool;

/// Write one pool file per location of `website` bound to this backend kind.
///
/// Returns the number of files written. Locations of other kinds are
/// skipped.
pub fn configure_website(
    website: &WebsiteDescriptor,
    config_path: &Path,
    fpm: &FpmConfig,
) -> Result<usize> {
    let mut written = 0;

    for location in &website.locations {
        let backend = &location.backend;
        if backend.kind != fpm.backend_kind {
            continue;
        }

        let text = render_pool(backend, &backend.id, fpm);
        let path = write_pool(config_path, &backend.id, &text)?;
        tracing::debug!(
            website = %website.name,
            pool = %backend.id,
            path = %path.display(),
            "Pool written"
        );
        written += 1;
    }

    Ok(written)
}

/// Replace `<config_path>/<id>.conf` with `text`.
///
/// The content goes to a sibling temp file first and is renamed into place,
/// so a failed write never leaves a truncated pool file behind.
pub fn write_pool(config_path: &Path, id: &str, text: &str) -> Result<PathBuf> {
    let path = config_path.join(format!("{id}.conf"));
    let tmp = config_path.join(format!(".{id}.conf.tmp"));

    let result = fs::write(&tmp, text).and_then(|()| fs::rename(&tmp, &path));
    if let Err(source) = result {
        let _ = fs::remove_file(&tmp);
        return Err(Error::Write { path, source });
    }

    Ok(path)
}
