//! File-backed store.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{KeyValueStore, StorageError};

/// A [`KeyValueStore`] that keeps each key in `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling file which is then renamed over the
/// target, so a failed write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] unless the key is non-empty and
    /// made of ASCII letters, digits, `-` and `_`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');

        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        fs::create_dir_all(&self.dir)?;

        let tmp = self
            .dir
            .join(format!(".{key}.json.tmp.{}", std::process::id()));

        if let Err(err) = write_then_rename(&tmp, &path, value) {
            _ = fs::remove_file(&tmp);

            return Err(err.into());
        }

        debug!(path = %path.display(), bytes = value.len(), "wrote value");

        Ok(())
    }
}

fn write_then_rename(tmp: &Path, path: &Path, value: &str) -> io::Result<()> {
    let mut file = File::create(tmp)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()?;
    drop(file);

    fs::rename(tmp, path)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_file_reads_as_none() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("cart")?, None);

        Ok(())
    }

    #[test]
    fn set_then_get_returns_value() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut store = FileStore::new(dir.path().join("nested"));

        store.set("cart", "[]")?;
        store.set("cart", r#"[{"id":"a"}]"#)?;

        assert_eq!(store.get("cart")?.as_deref(), Some(r#"[{"id":"a"}]"#));
        assert!(dir.path().join("nested").join("cart.json").exists());

        Ok(())
    }

    #[test]
    fn set_leaves_no_temporary_files() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut store = FileStore::new(dir.path());

        store.set("cart", "[]")?;

        let names = fs::read_dir(dir.path())?
            .map(|entry| entry.map(|entry| entry.file_name()))
            .collect::<Result<Vec<_>, _>>()?;

        assert_eq!(names, vec![std::ffi::OsString::from("cart.json")]);

        Ok(())
    }

    #[test]
    fn failed_write_removes_temporary_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("cart.json");
        fs::create_dir(&target)?;
        fs::write(target.join("occupied"), "")?;
        let mut store = FileStore::new(dir.path());

        assert!(matches!(store.set("cart", "[]"), Err(StorageError::Io(_))));

        let names = fs::read_dir(dir.path())?
            .map(|entry| entry.map(|entry| entry.file_name()))
            .collect::<Result<Vec<_>, _>>()?;

        assert_eq!(names, vec![std::ffi::OsString::from("cart.json")]);

        Ok(())
    }

    #[test]
    fn rejects_path_like_keys() {
        let store = FileStore::new("/tmp");

        for key in ["", "../cart", "a/b", "cart.json"] {
            assert!(
                matches!(store.path_for(key), Err(StorageError::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
    }

    #[test]
    fn unreadable_path_is_an_io_error() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("cart.json"))?;
        let store = FileStore::new(dir.path());

        assert!(matches!(store.get("cart"), Err(StorageError::Io(_))));

        Ok(())
    }
}
