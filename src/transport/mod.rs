//! Transport layer segment construction
//!
//! This module contains the TCP segment encoder:
//! - tcp: header/option types and the SYN segment builder

pub mod tcp;

// Re-export commonly used items
pub use tcp::{build_segment, generate_syn, generate_syn_with_rng, TcpHeader, TcpOption};
