//! Locating optional model grid files for tests.
//!
//! Real grids (NEMO mesh masks, WRF geo files) are too large to commit.
//! Tests that want one ask [`find_test_file`] and skip when it is absent.

use std::path::{Path, PathBuf};

/// Environment variable naming an extra directory of grid files.
pub const TEST_DATA_ENV: &str = "TEST_DATA_DIR";

/// The workspace root: the nearest ancestor whose `Cargo.toml` declares
/// `[workspace]`, or this crate's directory if none does.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .skip(1)
        .find(|dir| is_workspace_root(dir))
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

fn is_workspace_root(dir: &Path) -> bool {
    std::fs::read_to_string(dir.join("Cargo.toml"))
        .map(|manifest| manifest.contains("[workspace]"))
        .unwrap_or(false)
}

/// `crates/{crate_name}/testdata` under the workspace root.
pub fn crate_testdata_dir(crate_name: &str) -> PathBuf {
    workspace_root().join("crates").join(crate_name).join("testdata")
}

/// Directories searched for test files, most specific first:
/// `$TEST_DATA_DIR`, `crates/netcdf-io/testdata`, then `testdata` at the
/// workspace root.
pub fn test_data_dirs() -> Vec<PathBuf> {
    let env_dir = std::env::var_os(TEST_DATA_ENV).map(PathBuf::from);
    env_dir
        .into_iter()
        .chain([
            crate_testdata_dir("netcdf-io"),
            workspace_root().join("testdata"),
        ])
        .collect()
}

/// First existing `name` in [`test_data_dirs`].
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    test_data_dirs()
        .into_iter()
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
}

/// A scratch directory removed when the guard is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Like [`temp_test_dir`], with a recognizable name prefix.
pub fn temp_test_dir_with_prefix(prefix: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("Failed to create temporary test directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_has_members() {
        let root = workspace_root();
        assert!(is_workspace_root(&root), "no workspace manifest in {:?}", root);
        assert!(root.join("crates").join("test-utils").is_dir());
    }

    #[test]
    fn test_search_order_ends_at_workspace_testdata() {
        let dirs = test_data_dirs();
        assert_eq!(dirs.last(), Some(&workspace_root().join("testdata")));
        assert!(dirs.contains(&crate_testdata_dir("netcdf-io")));
    }

    #[test]
    fn test_missing_file_not_found() {
        assert!(find_test_file("definitely_not_a_mesh_mask.nc").is_none());
    }

    #[test]
    fn test_temp_dir_prefix() {
        let dir = temp_test_dir_with_prefix("scrip_test_");
        let name = dir.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("scrip_test_"));
    }
}
