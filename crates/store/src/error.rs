// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Store and import errors
//!

use thiserror::Error;

/// Errors that can occur when reading or writing the key-value store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Keys are made of lowercase ASCII letters, digits and `-`
    #[error("`{0}` is not a valid store key")]
    InvalidKey(String),

    /// The platform gave no directory to keep data in
    #[error("could not determine a data directory")]
    Config,

    /// An error occured when working with the store's files
    #[error(transparent)]
    StdIo(#[from] std::io::Error),

    /// A stored value is not the JSON it should be
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

/// Errors that can occur when importing events.  An import that fails leaves
/// the existing events untouched.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The CSV text has no header line
    #[error("the CSV has no header")]
    EmptyCsv,

    #[error("`{0}` is not a Google sheet ID")]
    InvalidSheetId(String),

    /// An error occured when reading the file to import
    #[error(transparent)]
    StdIo(#[from] std::io::Error),

    /// The JSON is not a timeline document
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    /// An error when fetching a sheet
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}
