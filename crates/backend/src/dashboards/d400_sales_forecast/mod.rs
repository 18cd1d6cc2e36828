pub mod aggregator;
pub mod engine;
pub mod service;
