//! Raw TCP segment construction
//!
//! This library builds wire-format TCP segments for connection initiation:
//! - IPv4 address parsing and validation
//! - Internet checksum with the TCP pseudo-header
//! - TCP header and option serialization
//! - SYN segment generation
//!
//! It is a packet-encoding primitive, not a network stack: nothing here
//! sends, receives, or tracks connection state. The output is a TCP
//! segment only, meant to be embedded in a caller-constructed IP datagram.

pub mod error;
pub mod network;
pub mod transport;

// Re-export commonly used types
pub use error::PacketError;
pub use network::addr::{is_valid_ip, parse_ipv4};
pub use network::checksum::tcp_checksum;
pub use transport::tcp::{build_segment, generate_syn, generate_syn_with_rng, TcpHeader, TcpOption};
