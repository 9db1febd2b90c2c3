//! Terminal UI components: buttons, text input, modal popups and a data table
//! with free-text search, column sorting and pagination.
//!
//! The table logic itself lives in [`libs::table`] and has no terminal
//! dependency; [`component::table::TableComp`] renders it with ratatui. The
//! binary in `main.rs` runs two demo pages on top of the layer stack in [`app`].

pub mod actions;
pub mod app;
pub mod cli;
pub mod component;
pub mod config;
pub mod libs;
pub mod page;
pub mod tui;
pub mod utils;
