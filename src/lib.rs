//! bookable — seat-aware booking availability and time-slot resolution.
//!
//! Takes a listing's weekly availability plan, its date-range exceptions,
//! and a user's in-progress date/time selection, and computes which days
//! and hours are selectable, how adjacent slots merge or split under seat
//! constraints, and the combined slot a booking request would cover.
//!
//! The whole pipeline is pure and stateless: plain data in, plain data
//! out, no clock or store access. Callers (booking forms, a CLI, tests)
//! re-run [`engine::resolve`] whenever any input changes.

pub mod config;
pub mod engine;
pub mod model;
