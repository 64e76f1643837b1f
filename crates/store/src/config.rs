// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Where Timeline Pro keeps its data
//!

use crate::{FileStore, StoreError};
use directories_next::ProjectDirs;
use log::info;
use std::path::{Path, PathBuf};

const PROJECT_QUALIFIER: &str = "org";
const ORG_NAME: &str = "TimelinePro";
const APPLICATION_NAME: &str = "TimelinePro";
const STORE_DIR_NAME: &str = "store";

/// The application's configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// The directory all data is kept in
    data_dir: PathBuf,
}

impl AppConfig {
    /// Use the platform's data directory for the application
    pub fn from_project_dirs() -> Result<Self, StoreError> {
        let data_dir = project_dirs()?.data_dir().to_path_buf();
        info!("Data directory = {}", data_dir.display());
        Ok(Self { data_dir })
    }

    /// Use the given data directory
    pub fn with_data_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Use the given data directory if there is one, otherwise the platform's
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self, StoreError> {
        match data_dir {
            Some(data_dir) => Ok(Self::with_data_dir(data_dir)),
            None => Self::from_project_dirs(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The directory the key-value store lives in
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join(STORE_DIR_NAME)
    }

    /// Open the key-value store
    pub fn open_store(&self) -> FileStore {
        FileStore::new(self.store_dir())
    }
}

/// Get the project directories (e.g. where the data is stored)
#[cfg(debug_assertions)]
fn project_dirs() -> Result<ProjectDirs, StoreError> {
    info!("Getting project directories (dev build)");
    ProjectDirs::from(
        PROJECT_QUALIFIER,
        ORG_NAME,
        &format!("{APPLICATION_NAME} Dev"),
    )
    .ok_or(StoreError::Config)
}

/// Get the project directories (e.g. where the data is stored)
#[cfg(not(debug_assertions))]
fn project_dirs() -> Result<ProjectDirs, StoreError> {
    info!("Getting project directories");
    ProjectDirs::from(PROJECT_QUALIFIER, ORG_NAME, APPLICATION_NAME).ok_or(StoreError::Config)
}
