//! Network layer primitives
//!
//! This module contains the pieces of the network layer the segment
//! builder depends on:
//! - addr: IPv4 dotted-decimal parsing and validation
//! - checksum: the internet checksum and its TCP pseudo-header variant

pub mod addr;
pub mod checksum;

// Re-export commonly used items
pub use addr::{is_valid_ip, parse_ipv4};
pub use checksum::{internet_checksum, tcp_checksum};

/// IP protocol number constants
pub mod protocol {
    pub const TCP: u8 = 6;
}
