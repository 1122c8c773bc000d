//! Finds the `pg_worker` binary and stages a copy `nobody` can execute.

use super::BoxError;
use super::fs_utils::open_parent_dir;
#[cfg(unix)]
use cap_std::fs::{Permissions, PermissionsExt};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const WORKER_NAME: &str = "pg_worker";

static STAGED_WORKER: OnceLock<PathBuf> = OnceLock::new();

/// Looks for the worker built alongside this test binary, then on `PATH`.
pub(super) fn locate_pg_worker() -> Option<PathBuf> {
    option_env!("CARGO_BIN_EXE_pg_worker")
        .map(PathBuf::from)
        .filter(|path| path.is_file())
        .or_else(worker_near_test_binary)
        .or_else(worker_on_path)
}

/// Copies the worker into the temp directory with world-execute rights.
///
/// Build directories under a root home are not traversable once the worker
/// drops its privileges.
pub(super) fn prepare_pg_worker(worker: &Path) -> Result<PathBuf, BoxError> {
    if let Some(staged) = STAGED_WORKER.get() {
        return Ok(staged.clone());
    }

    let destination =
        std::env::temp_dir().join(format!("{WORKER_NAME}_{pid}", pid = std::process::id()));
    let (source_dir, source_name) = open_parent_dir(worker)?;
    let (destination_dir, destination_name) = open_parent_dir(&destination)?;
    match destination_dir.remove_file(destination_name) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(Box::new(err)),
    }
    source_dir
        .copy(source_name, &destination_dir, destination_name)
        .map_err(|err| Box::new(err) as BoxError)?;

    #[cfg(unix)]
    destination_dir
        .set_permissions(destination_name, Permissions::from_mode(0o755))
        .map_err(|err| Box::new(err) as BoxError)?;

    Ok(STAGED_WORKER.get_or_init(|| destination).clone())
}

fn worker_near_test_binary() -> Option<PathBuf> {
    let test_binary = std::env::current_exe().ok()?;
    let candidate = test_binary.parent()?.parent()?.join(WORKER_NAME);
    candidate.is_file().then_some(candidate)
}

fn worker_on_path() -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(WORKER_NAME))
        .find(|candidate| candidate.is_file())
}
