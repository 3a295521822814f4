//! End-to-end `optimize()` scenarios, grouped by what they exercise.

mod closed_tour;
mod common;
mod path_mode;
mod termination;
