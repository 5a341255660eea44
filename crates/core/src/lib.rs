//! # Timetable Core
//!
//! Domain types and the weekly grid builder for classroom timetables.
//! Nothing in this crate performs I/O; the backend client lives in
//! `timetable-client`.

pub mod errors;
pub mod grid;
pub mod models;
