// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider Timeline Pro project*
//!
//! This library crate is responsible for everything that leaves or enters the
//! application as data.  It does the following:
//!
//! - Persists the event collection and the settings to a key-value store
//! (a directory of JSON files, or memory for tests)
//! - Imports events from JSON documents, CSV text and published Google sheets
//! - Exports the event collection as a JSON document
//! - Works out where the application keeps its data
//!
//! This crate makes use of the basic Timeline Pro `core` crate for the data
//! types, and is itself used by the command line front end.
//!

mod config;
mod error;
mod export;
mod import;
mod persistence;
mod store;

pub use config::*;
pub use error::*;
pub use export::*;
pub use import::*;
pub use persistence::*;
pub use store::*;
