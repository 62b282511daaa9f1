//! Admin access gate

pub(crate) mod middleware;
