//! Query language front ends.

pub mod gremlin;
