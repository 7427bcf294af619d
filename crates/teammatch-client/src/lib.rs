// HTTP client for the remote team balancer.

pub mod client;

pub use client::{interpret_response, BalanceError, BalanceService, HttpBalanceClient};
