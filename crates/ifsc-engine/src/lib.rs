//! IFSC Engine - read-only query layer
//!
//! Wires the pagination kernel from `ifsc-core` to a storage executor from
//! `ifsc-store` and exposes the directory's queries, both as typed resolver
//! methods and through the single [`EngineQuery`] dispatch point.

pub mod commands;

pub use commands::directory::QueryEngine;
pub use commands::engine_query::{EngineQuery, EngineQueryResult};
pub use commands::read_tools::{BankPage, BranchPage, ListOptions, StatsResult};
