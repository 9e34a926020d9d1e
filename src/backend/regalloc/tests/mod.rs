// Scenario and invariant tests for the whole allocation pipeline
mod common;

mod invariants;
mod scenarios;
