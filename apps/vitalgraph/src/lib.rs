//! # vitalgraph (library surface)
//!
//! The binary's modules, exposed as a library so integration tests can
//! build the router and drive the CLI plumbing directly.

pub mod api;
pub mod cli;
