//! CLI command implementations.

pub(crate) mod aggregate;
pub(crate) mod clean;
pub(crate) mod interval;
