//! Credential store adapters.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::ports::{CredentialStore, CredentialStoreError};

fn io_error(error: &io::Error) -> CredentialStoreError {
    CredentialStoreError::io(error.to_string())
}

/// Token persisted as a single file, accessed through a `cap_std` directory
/// handle.
#[derive(Debug)]
pub struct FileCredentialStore {
    directory: Dir,
    file_name: OsString,
}

impl FileCredentialStore {
    /// Open the store backed by `path`. The parent directory must exist; the
    /// file itself is created on the first `store`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialStoreError::Io`] when `path` has no file name or
    /// its parent directory cannot be opened.
    pub fn open(path: &Path) -> Result<Self, CredentialStoreError> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = path
            .file_name()
            .ok_or_else(|| CredentialStoreError::io("token path must include a file name"))?
            .to_os_string();
        let directory =
            Dir::open_ambient_dir(parent, ambient_authority()).map_err(|e| io_error(&e))?;
        Ok(Self {
            directory,
            file_name,
        })
    }

    fn file(&self) -> &Path {
        Path::new(&self.file_name)
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<String>, CredentialStoreError> {
        match self.directory.read_to_string(self.file()) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_owned()))
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(io_error(&error)),
        }
    }

    fn store(&self, token: &str) -> Result<(), CredentialStoreError> {
        debug!("persisting credential");
        self.directory
            .write(self.file(), token.as_bytes())
            .map_err(|e| io_error(&e))
    }

    fn remove(&self) -> Result<(), CredentialStoreError> {
        debug!("removing credential");
        match self.directory.remove_file(self.file()) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(io_error(&error)),
        }
    }
}

/// Token held in memory only.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl InMemoryCredentialStore {
    /// Store pre-loaded with `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> Result<Option<String>, CredentialStoreError> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn store(&self, token: &str) -> Result<(), CredentialStoreError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        Ok(())
    }

    fn remove(&self) -> Result<(), CredentialStoreError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
