//! Work time engine
//!
//! This crate computes net working time from recorded start and end
//! timestamps with a threshold-based unpaid break deduction, and generates
//! the public holidays of a year for a German federal state.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod notes;
pub mod storage;
