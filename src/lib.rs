//! ShoreSquad weather widget library
//!
//! This module exposes the widget's building blocks for the binary and for
//! integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod clock;
pub mod config;
pub mod data;
pub mod logging;
pub mod schedule;
pub mod ui;
pub mod view;
