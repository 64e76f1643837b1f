// SPDX-License-Identifier: MIT

//!
//! *Part of the wider Timeline Pro project*
//!
//! This crate defines the basic datatypes used across the Timeline Pro project
//! (renderer, persistence & import adapters, command line front end).
//!
//! Events are owned by the application and handed to the renderer by
//! reference on every render pass, so everything here is plain data.  Where a
//! value must satisfy an invariant (an event's scale is positive, a percentage
//! lies between 0 and 100) the type's constructors and setters enforce it.
//!

mod collection;
mod colour;
mod date;
mod document;
mod event;
mod id;
mod settings;

pub use collection::*;
pub use colour::*;
pub use date::*;
pub use document::*;
pub use event::*;
pub use id::*;
pub use settings::*;

pub use timeline_pro_macros::{colour, date};
