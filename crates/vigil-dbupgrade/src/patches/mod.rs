//! Shipped patch branches, one module per release line.

pub mod v7_2;
