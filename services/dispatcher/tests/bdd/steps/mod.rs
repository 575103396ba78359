//! BDD step definitions for the dispatcher service

pub mod scheduler_steps;
