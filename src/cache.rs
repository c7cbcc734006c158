use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

use log::{debug, warn};

/// Variable fontconfig reads to locate its cache.
pub const CACHE_ENV: &str = "XDG_CACHE_HOME";
/// Cache directory created under the working directory.
pub const LOCAL_CACHE_DIR: &str = ".raster-cache";

static REDIRECT: Once = Once::new();

/// Point the font backend's cache at a writable directory under the working
/// directory, unless the user already chose one.
///
/// Must run before the first render. Runs at most once per process; later
/// calls are no-ops. A directory that cannot be created is only logged.
pub fn redirect_backend_cache() {
    REDIRECT.call_once(|| {
        let cwd = match std::env::current_dir() {
            Ok(cwd) => cwd,
            Err(e) => {
                warn!("Cannot resolve working directory for font cache: {e}");
                return;
            }
        };
        let Some(dir) = cache_dir_for(std::env::var_os(CACHE_ENV), &cwd) else {
            debug!("{CACHE_ENV} already set, leaving font cache alone");
            return;
        };
        if let Err(e) = fs::create_dir_all(&dir) {
            warn!("Cannot create font cache dir {}: {e}", dir.display());
        }
        std::env::set_var(CACHE_ENV, &dir);
        debug!("Font cache redirected to {}", dir.display());
    });
}

/// The directory to use, or `None` when `existing` is already set.
fn cache_dir_for(existing: Option<OsString>, cwd: &Path) -> Option<PathBuf> {
    match existing {
        Some(value) if !value.is_empty() => None,
        _ => Some(cwd.join(LOCAL_CACHE_DIR)),
    }
}
