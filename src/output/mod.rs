//! Output module for VerifyLens
//!
//! This module renders session state for the terminal.

pub mod presenter;

pub use presenter::{render, render_document, render_result, Presenter, LOADING_MESSAGE, RESULTS_TITLE};
