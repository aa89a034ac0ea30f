//! Initialize the POS xml directory

use crate::error::Result;
use crate::infrastructure::XmlConfigStore;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write the default config.xml and devices.xml into `xml_dir`.
///
/// Existing files are kept unless `force` is set; a directory that already
/// has a config.xml is refused without `force`.
pub fn init(xml_dir: &Path, force: bool) -> Result<Vec<PathBuf>> {
    let store = XmlConfigStore::new(xml_dir.to_path_buf());
    let written = store.initialize(force)?;

    info!(dir = %xml_dir.display(), files = written.len(), "Initialized xml directory");
    Ok(written)
}
