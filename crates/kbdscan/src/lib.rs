//! kbdscan: show raw console keyboard scancodes.
//!
//! This crate switches a console into raw line discipline and raw scancode
//! keyboard mode, reports every key press and release as
//! `Scancode <n> pressed.` / `Scancode <n> released.`, and restores the
//! console once the user stops typing for five seconds, on any error, or
//! when a termination signal arrives.
//!
//! Entry point is [`session::run_session`]; device access goes through the
//! [`device::ConsoleDevice`] trait so the whole lifecycle can be driven
//! against a scripted device in tests.

// Library documentation is in progress. Public API types have docs;
// accessors and error variants are self-describing.
#![allow(missing_docs)]

pub mod device;
pub mod error;
pub mod event_loop;
pub mod mode;
pub mod model;
pub mod session;
pub mod shutdown;
pub mod signal;

pub use crate::error::{ErrorCode, ScanError, ScanResult};
pub use crate::model::*;
