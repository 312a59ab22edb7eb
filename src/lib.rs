//! # Connect Four
//!
//! A two-player Connect Four game: a rule engine with a tick-driven turn
//! controller and end-of-game popup, plus a terminal front end built with
//! Ratatui and a headless script runner.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, win/draw rules, turn controller, popup
//! - [`ui`] — Terminal UI: game loop, falling-piece animation, rendering
//! - [`headless`] — Scripted play that reports the final state as JSON
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod headless;
pub mod ui;
