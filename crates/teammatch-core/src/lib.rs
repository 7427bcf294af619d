// Result-interpretation layer for the team matcher.
//
// Everything in this crate is a pure function over its inputs: roster
// validation, score tiers, statistic normalization, team aggregates, and the
// render-ready report that combines them.

pub mod aggregate;
pub mod model;
pub mod rank;
pub mod report;
pub mod roster;
pub mod stats;
