// Application layer: configuration, UI/command protocol, and the submission
// orchestrator that sits between the terminal front end and the balancer.

pub mod app;
pub mod config;
pub mod protocol;
