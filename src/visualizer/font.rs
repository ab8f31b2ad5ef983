// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Font lookup for on-screen labels.
//!
//! Fonts are cached in `<config dir>/pose3d-viz/` and fetched from the Ultralytics assets
//! release on first use.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{info, verbose, warn};

/// Assets URL for downloading fonts.
const ASSETS_URL: &str = "https://github.com/ultralytics/assets/releases/download/v0.0.0";

/// Font used for the debug text and heatmap labels.
pub const DEFAULT_FONT: &str = "Arial.ttf";

/// Connect timeout in seconds.
const CONNECT_TIMEOUT: u64 = 10;
/// Body read timeout in seconds.
const READ_TIMEOUT: u64 = 30;

/// Directory fonts are cached in.
#[must_use]
pub fn font_dir() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("pose3d-viz"))
}

/// Locate `font` in the cache directory, downloading it if `download` is set and it is
/// missing.
///
/// Returns `None` when the font is neither cached nor downloadable.
#[must_use]
pub fn check_font(font: &str, download: bool) -> Option<PathBuf> {
    check_font_in(&font_dir()?, font, download)
}

/// [`check_font`] against an explicit cache directory.
///
/// Only the file name of `font` is used.
#[must_use]
pub fn check_font_in(dir: &Path, font: &str, download: bool) -> Option<PathBuf> {
    let font_name = Path::new(font).file_name()?.to_string_lossy().into_owned();
    let font_path = dir.join(&font_name);
    if font_path.is_file() {
        verbose!("Using cached font {}", font_path.display());
        return Some(font_path);
    }
    if !download {
        return None;
    }

    if let Err(e) = fs::create_dir_all(dir) {
        warn!("Failed to create font directory {}: {e}", dir.display());
        return None;
    }

    let url = format!("{ASSETS_URL}/{font_name}");
    info!("Downloading {url} to {}", font_path.display());
    match download_font(&url, &font_path) {
        Ok(()) => Some(font_path),
        Err(e) => {
            warn!("Failed to download font from {url}: {e}");
            None
        }
    }
}

/// Stream `url` into `dest` through a `.part` file.
fn download_font(url: &str, dest: &Path) -> io::Result<()> {
    let config = ureq::Agent::config_builder()
        .timeout_connect(Some(Duration::from_secs(CONNECT_TIMEOUT)))
        .timeout_recv_body(Some(Duration::from_secs(READ_TIMEOUT)))
        .build();
    let agent = ureq::Agent::new_with_config(config);
    let response = agent.get(url).call().map_err(io::Error::other)?;

    let temp_path = dest.with_extension("part");
    let copied = File::create(&temp_path).and_then(|mut file| {
        let mut reader = response.into_body().into_reader();
        io::copy(&mut reader, &mut file)
    });
    match copied {
        Ok(_) => fs::rename(&temp_path, dest),
        Err(e) => {
            let _ = fs::remove_file(&temp_path);
            Err(e)
        }
    }
}
