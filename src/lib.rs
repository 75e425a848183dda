//! gridview - Interactive data table and debug viewer library.
//!
//! This library provides the pieces used by the `gridview` binary:
//! - `table` - generic table controller (search, filter, sort, paging, CRUD, export)
//! - `debug` - element concern report and clear-issues client
//! - `tui` - terminal frontend

pub mod alert;
pub mod clipboard;
pub mod config;
pub mod debug;
pub mod models;
pub mod notify;
pub mod table;
pub mod tui;
pub mod view;
