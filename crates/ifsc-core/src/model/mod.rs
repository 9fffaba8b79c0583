//! Domain model: banks, branches, and the raw rows they are decoded from.

mod bank;
mod branch;
mod row;

pub use bank::Bank;
pub use branch::Branch;
pub use row::{Row, SqlValue};
