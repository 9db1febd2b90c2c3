//! Framework-independent building blocks: the table view model and datasets.

pub mod dataset;
pub mod table;
