//! Scrapes livestock-commodity quote tables from public agribusiness pages,
//! normalizes them into tabular records, derives summary views and persists
//! each stage to CSV.

pub mod b3;
pub mod display;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod locality;
pub mod normalize;
pub mod pipeline;
pub mod pivot;
pub mod sink;
pub mod sources;
pub mod table;
