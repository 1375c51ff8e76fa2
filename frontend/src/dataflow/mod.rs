//! Event streaming between drag callbacks and application code

pub mod relay;

pub use relay::{Relay, RelayError, relay};
