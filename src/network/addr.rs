//! IPv4 address parsing and validation
//!
//! Addresses enter the builder as dotted-decimal text. Parsing is fallible:
//! a malformed octet, a wrong segment count, or an empty piece is reported
//! as an error rather than silently mapped to zero. Validation and byte
//! extraction are the same operation, so they can never disagree about
//! which strings are acceptable; IPv6 literals are rejected outright.

use crate::error::PacketError;

/// Parse a dotted-decimal IPv4 address into its 4 network-order bytes.
///
/// Requires exactly four decimal octets, each in `0..=255`. Any other
/// shape fails with [`PacketError::InvalidAddress`].
pub fn parse_ipv4(addr: &str) -> Result<[u8; 4], PacketError> {
    let mut bytes = [0u8; 4];
    let mut count = 0;

    for piece in addr.split('.') {
        if count == 4 {
            return Err(PacketError::InvalidAddress(addr.to_string()));
        }
        bytes[count] = piece
            .parse::<u8>()
            .map_err(|_| PacketError::InvalidAddress(addr.to_string()))?;
        count += 1;
    }

    if count != 4 {
        return Err(PacketError::InvalidAddress(addr.to_string()));
    }

    Ok(bytes)
}

/// Check whether text is a valid IPv4 dotted-decimal address.
///
/// Used as a precondition gate before building a segment.
pub fn is_valid_ip(addr: &str) -> bool {
    parse_ipv4(addr).is_ok()
}
