//! Test utilities and fixtures for kbdscan integration tests.
//!
//! - [`ConsoleBuilder`] - Fluent API for scripting a fake console device
//! - [`ScriptedConsole`] / [`ConsoleHandle`] - The fake device and its shared log
//! - [`open_pty`] - Pseudo-terminal pair for tests that need real termios
//! - [`output_lines`] - Split captured scancode output into lines
//!
//! # Example
//!
//! ```ignore
//! use kbdscan::model::ScanConfig;
//! use kbdscan::session::run_session;
//! use kbdscan_fixtures::ConsoleBuilder;
//!
//! let console = ConsoleBuilder::new().byte(0x41).build();
//! let handle = console.handle();
//! let mut output = Vec::new();
//! let report = run_session(console, &mut output, &ScanConfig::default());
//! assert_eq!(report.exit_code(), 0);
//! assert_eq!(handle.restore_calls(), 1);
//! ```

// Test fixtures crate - relaxed lints for test utilities
#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::print_stderr)]
#![allow(missing_docs)]

pub mod builders;
pub mod console;
pub mod helpers;

pub use builders::ConsoleBuilder;
pub use console::{Call, ConsoleHandle, FakeAttributes, Faults, ScriptStep, ScriptedConsole};
pub use helpers::{open_pty, output_lines};
