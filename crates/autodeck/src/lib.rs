//! Self-advancing slide presenter.
//!
//! [`deck`] holds the host-independent controller: slide index, autoplay,
//! auto-hiding control panel, input routing and the timer queue that drives
//! them. [`app`] hosts it in an egui window.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod deck;
pub mod parser;
pub mod theme;
