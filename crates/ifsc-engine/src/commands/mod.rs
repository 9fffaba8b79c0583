//! Query orchestration.
//!
//! `directory` holds the entity resolvers, `engine_query` the logged
//! dispatch surface used by the transports, `read_tools` the result types.

pub mod directory;
pub mod engine_query;
pub mod read_tools;
