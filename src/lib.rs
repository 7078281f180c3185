//! Automatic weekly timetable generation for a school.
//!
//! Class-subject assignments are expanded into lesson demands, shuffled, and
//! placed greedily onto free (time slot, room) pairs. Lessons that cannot be
//! placed under the hard constraints become conflicts. Runs are tracked with
//! status, progress and statistics and exposed over HTTP.

pub mod config;
pub mod conflict;
pub mod data;
pub mod demand;
pub mod error;
pub mod run;
pub mod server;
pub mod settings;
pub mod solver;
