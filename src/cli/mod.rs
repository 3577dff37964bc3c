//! Terminal presentation collaborator: renders the plain data structures
//! produced by the core into tables and bar charts.

pub mod boundary;
pub mod history;
pub mod report;
pub mod ui;
