//! Error types for the front-end.
//!
//! Parsing never stops on a fault. Each fault becomes one of the
//! variants defined here and is collected by the parser, in order.

pub mod errors;
