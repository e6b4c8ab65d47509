//! Error types surfaced by segment construction.

use thiserror::Error;

/// Failures that abort a build before any bytes are produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PacketError {
    /// An address argument is not a valid IPv4 dotted-decimal string.
    #[error("invalid IP address: {0:?}")]
    InvalidAddress(String),

    /// An option's declared length disagrees with its payload.
    #[error("invalid option (kind {kind}): declared length {declared} does not match payload")]
    InvalidOption { kind: u8, declared: u8 },
}
