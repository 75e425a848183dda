//! UI-agnostic view models.
//!
//! Each sub-module builds a [`common::TableViewModel`] from controller state.
//! The TUI then maps the view model to ratatui widgets for rendering.

pub mod common;
pub mod concerns;
pub mod customers;
