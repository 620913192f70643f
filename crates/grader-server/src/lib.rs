//! Grader HTTP server library (router + handlers for the `grader` binary).

pub mod gateway;
