//! Shared helpers for the terminal shell.
//!
//! ```text
//! utils/
//! ├── errors.rs     - color-eyre hooks and the panic hook that restores the terminal
//! ├── help_msg.rs   - key hints shown in the help bar and the help popup
//! ├── key_events.rs - key event wrapper with a readable string form
//! └── logging.rs    - tracing subscriber writing to the data directory
//! ```

#[cfg(not(tarpaulin_include))]
pub mod errors;
pub mod help_msg;
pub mod key_events;
#[cfg(not(tarpaulin_include))]
pub mod logging;
