//! Top-level facade crate for routegate.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use routegate_core::*;
}

pub mod gateway {
    pub use routegate_gateway::*;
}
