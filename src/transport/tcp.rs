//! TCP segment construction
//!
//! Builds the wire format of a TCP segment: the standard 20-byte header
//! (RFC 793), a caller-ordered options section, and 6 trailing reserved
//! zero bytes. The checksum is computed in two passes: the segment is
//! first encoded with the checksum field as supplied (normally zero),
//! the pseudo-header checksum is calculated over those bytes, and the
//! result is patched into the checksum field of the output.

use crate::error::PacketError;
use crate::network::addr::parse_ipv4;
use crate::network::checksum::tcp_checksum;
use byteorder::{BigEndian, ByteOrder};
use rand::Rng;

/// TCP header length in bytes
const TCP_HEADER_LEN: usize = 20;

/// Reserved zero bytes appended after the options section
const TRAILING_RESERVED_LEN: usize = 6;

/// Byte offset of the checksum field within the encoded header
const CHECKSUM_OFFSET: usize = 16;

/// Window size advertised in generated SYN segments
const SYN_WINDOW_SIZE: u16 = 1024;

/// Maximum segment size advertised in generated SYN segments
const SYN_MSS: u16 = 1460;

/// Combined data-offset/flags field for generated SYN segments
const SYN_OFFSET_AND_FLAGS: u16 = 0x8002;

/// TCP control flag masks within the combined data-offset/flags field
pub mod flags {
    pub const FIN: u16 = 0x0001;
    pub const SYN: u16 = 0x0002;
    pub const RST: u16 = 0x0004;
    pub const PSH: u16 = 0x0008;
    pub const ACK: u16 = 0x0010;
    pub const URG: u16 = 0x0020;
}

/// TCP packet header structure
///
/// Represents the standard 20-byte TCP header as defined in RFC 793.
/// The checksum field is normally left zero by the caller; the builder
/// computes and embeds the real value.
#[derive(Debug, Clone, Copy)]
pub struct TcpHeader {
    pub src_port: u16,
    pub dst_port: u16,
    pub seq_number: u32,
    pub ack_number: u32,
    pub data_offset_and_flags: u16, // Data offset (4 bits) + Reserved (3 bits) + Flags (9 bits)
    pub window_size: u16,
    pub checksum: u16,
    pub urgent_ptr: u16,
}

impl TcpHeader {
    /// Convert TCP header to bytes, all fields big-endian
    pub fn to_bytes(&self) -> [u8; TCP_HEADER_LEN] {
        let mut bytes = [0u8; TCP_HEADER_LEN];
        BigEndian::write_u16(&mut bytes[0..2], self.src_port);
        BigEndian::write_u16(&mut bytes[2..4], self.dst_port);
        BigEndian::write_u32(&mut bytes[4..8], self.seq_number);
        BigEndian::write_u32(&mut bytes[8..12], self.ack_number);
        BigEndian::write_u16(&mut bytes[12..14], self.data_offset_and_flags);
        BigEndian::write_u16(&mut bytes[14..16], self.window_size);
        BigEndian::write_u16(&mut bytes[16..18], self.checksum);
        BigEndian::write_u16(&mut bytes[18..20], self.urgent_ptr);
        bytes
    }

    /// Check if the SYN flag is set
    pub fn is_syn(&self) -> bool {
        (self.data_offset_and_flags & flags::SYN) != 0
    }
}

/// A single TCP option as it appears on the wire.
///
/// Encoded as the kind byte, the length byte, then the payload. Options
/// are emitted in caller order; nothing is reordered or padded to a word
/// boundary. Single-byte kinds (end-of-option-list, no-op) carry a zero
/// length byte and an empty payload, which keeps the encoded segment
/// even-length for the checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpOption {
    pub kind: u8,
    pub length: u8,
    pub data: Vec<u8>,
}

impl TcpOption {
    /// Maximum-segment-size option (kind 2) carrying a 2-byte value
    pub fn maximum_segment_size(mss: u16) -> Self {
        TcpOption {
            kind: 2,
            length: 4,
            data: mss.to_be_bytes().to_vec(),
        }
    }

    /// End-of-option-list marker (kind 0)
    pub fn end_of_options() -> Self {
        TcpOption {
            kind: 0,
            length: 0,
            data: Vec::new(),
        }
    }

    /// No-operation option (kind 1)
    pub fn noop() -> Self {
        TcpOption {
            kind: 1,
            length: 0,
            data: Vec::new(),
        }
    }

    /// Number of bytes this option occupies on the wire
    pub fn encoded_len(&self) -> usize {
        2 + self.data.len()
    }

    /// Check that the declared length matches the payload.
    ///
    /// Options with a payload must declare `payload + 2` (kind and length
    /// bytes included); payload-free options must declare zero.
    fn validate(&self) -> Result<(), PacketError> {
        let expected = if self.data.is_empty() {
            0
        } else {
            self.data.len() + 2
        };
        if usize::from(self.length) != expected {
            return Err(PacketError::InvalidOption {
                kind: self.kind,
                declared: self.length,
            });
        }
        Ok(())
    }
}

/// Serialize header, options, and the reserved tail into one buffer
fn encode_segment(header: &TcpHeader, options: &[TcpOption]) -> Vec<u8> {
    let options_len: usize = options.iter().map(TcpOption::encoded_len).sum();
    let mut buf = Vec::with_capacity(TCP_HEADER_LEN + options_len + TRAILING_RESERVED_LEN);

    buf.extend_from_slice(&header.to_bytes());
    for option in options {
        buf.push(option.kind);
        buf.push(option.length);
        buf.extend_from_slice(&option.data);
    }
    buf.extend_from_slice(&[0u8; TRAILING_RESERVED_LEN]);

    buf
}

/// Build a TCP segment with its checksum embedded.
///
/// Validates both addresses, serializes `header` (checksum field as
/// given, normally zero) followed by each option and 6 reserved zero
/// bytes, computes the pseudo-header checksum over those bytes, and
/// returns the segment with the checksum patched in. The caller's
/// header is not modified.
///
/// Header field ranges and total segment length are not checked; the
/// only validation is address syntax and option well-formedness.
pub fn build_segment(
    header: &TcpHeader,
    options: &[TcpOption],
    local_addr: &str,
    remote_addr: &str,
) -> Result<Vec<u8>, PacketError> {
    let src = parse_ipv4(local_addr)?;
    let dst = parse_ipv4(remote_addr)?;

    for option in options {
        option.validate()?;
    }

    // First pass: encode with the checksum field as supplied.
    let mut segment = encode_segment(header, options);

    // Second pass differs only in the checksum field, so patch it in place.
    let sum = tcp_checksum(&segment, src, dst);
    BigEndian::write_u16(&mut segment[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 2], sum);

    Ok(segment)
}

/// Build a SYN segment using the supplied random source for the initial
/// sequence number.
///
/// The header carries the SYN flag with a 5-word data offset, a window
/// of 1024, and no acknowledgment; the options advertise an MSS of 1460
/// followed by the end-of-option-list marker. Total output length is
/// 32 bytes.
pub fn generate_syn_with_rng<R: Rng>(
    local_addr: &str,
    remote_addr: &str,
    src_port: u16,
    dst_port: u16,
    rng: &mut R,
) -> Result<Vec<u8>, PacketError> {
    let options = [
        TcpOption::maximum_segment_size(SYN_MSS),
        TcpOption::end_of_options(),
    ];
    let header = TcpHeader {
        src_port,
        dst_port,
        seq_number: rng.gen(),
        ack_number: 0,
        data_offset_and_flags: SYN_OFFSET_AND_FLAGS,
        window_size: SYN_WINDOW_SIZE,
        checksum: 0,
        urgent_ptr: 0,
    };
    build_segment(&header, &options, local_addr, remote_addr)
}

/// Build a SYN segment with a random initial sequence number drawn from
/// the thread-local generator.
pub fn generate_syn(
    local_addr: &str,
    remote_addr: &str,
    src_port: u16,
    dst_port: u16,
) -> Result<Vec<u8>, PacketError> {
    generate_syn_with_rng(local_addr, remote_addr, src_port, dst_port, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_header() -> TcpHeader {
        TcpHeader {
            src_port: 12345,
            dst_port: 80,
            seq_number: 0x01020304,
            ack_number: 0,
            data_offset_and_flags: SYN_OFFSET_AND_FLAGS,
            window_size: 1024,
            checksum: 0,
            urgent_ptr: 0,
        }
    }

    #[test]
    fn test_header_to_bytes_layout() {
        let bytes = sample_header().to_bytes();
        assert_eq!(BigEndian::read_u16(&bytes[0..2]), 12345);
        assert_eq!(BigEndian::read_u16(&bytes[2..4]), 80);
        assert_eq!(BigEndian::read_u32(&bytes[4..8]), 0x01020304);
        assert_eq!(BigEndian::read_u32(&bytes[8..12]), 0);
        assert_eq!(BigEndian::read_u16(&bytes[12..14]), 0x8002);
        assert_eq!(BigEndian::read_u16(&bytes[14..16]), 1024);
        assert_eq!(BigEndian::read_u16(&bytes[16..18]), 0);
        assert_eq!(BigEndian::read_u16(&bytes[18..20]), 0);
    }

    #[test]
    fn test_syn_flag_query() {
        assert!(sample_header().is_syn());

        let mut plain = sample_header();
        plain.data_offset_and_flags = 0x8000;
        assert!(!plain.is_syn());
    }

    #[test]
    fn test_generate_syn_wire_format() {
        let segment = generate_syn("10.0.0.1", "10.0.0.2", 12345, 80).unwrap();

        // 20 header + 4 MSS + 2 end-of-options + 6 reserved
        assert_eq!(segment.len(), 32);
        assert_eq!(BigEndian::read_u16(&segment[0..2]), 12345);
        assert_eq!(BigEndian::read_u16(&segment[2..4]), 80);
        assert_eq!(BigEndian::read_u16(&segment[12..14]), 0x8002);
        assert_eq!(BigEndian::read_u16(&segment[14..16]), 1024);
        assert_eq!(&segment[20..24], &[2, 4, 0x05, 0xB4]);
        assert_eq!(&segment[24..26], &[0, 0]);
        assert_eq!(&segment[26..32], &[0u8; 6]);
    }

    #[test]
    fn test_option_ordering_preserved() {
        let options = [
            TcpOption::noop(),
            TcpOption::maximum_segment_size(1400),
            TcpOption::end_of_options(),
        ];
        let segment = build_segment(&sample_header(), &options, "10.0.0.1", "10.0.0.2").unwrap();

        assert_eq!(&segment[20..22], &[1, 0]);
        assert_eq!(&segment[22..26], &[2, 4, 0x05, 0x78]);
        assert_eq!(&segment[26..28], &[0, 0]);
    }

    #[test]
    fn test_invalid_address_rejected() {
        let err = build_segment(&sample_header(), &[], "1.2.3", "10.0.0.2").unwrap_err();
        assert_eq!(err, PacketError::InvalidAddress("1.2.3".to_string()));

        let err = build_segment(&sample_header(), &[], "10.0.0.1", "999.1.1.1").unwrap_err();
        assert_eq!(err, PacketError::InvalidAddress("999.1.1.1".to_string()));
    }

    #[test]
    fn test_invalid_option_rejected() {
        let bad = TcpOption {
            kind: 2,
            length: 10,
            data: vec![0x05, 0xB4],
        };
        let err = build_segment(&sample_header(), &[bad], "10.0.0.1", "10.0.0.2").unwrap_err();
        assert_eq!(err, PacketError::InvalidOption { kind: 2, declared: 10 });
    }

    #[test]
    fn test_build_is_deterministic() {
        let header = sample_header();
        let options = [
            TcpOption::maximum_segment_size(1460),
            TcpOption::end_of_options(),
        ];
        let a = build_segment(&header, &options, "10.0.0.1", "10.0.0.2").unwrap();
        let b = build_segment(&header, &options, "10.0.0.1", "10.0.0.2").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let a = generate_syn_with_rng("10.0.0.1", "10.0.0.2", 12345, 80, &mut StdRng::seed_from_u64(7))
            .unwrap();
        let b = generate_syn_with_rng("10.0.0.1", "10.0.0.2", 12345, 80, &mut StdRng::seed_from_u64(7))
            .unwrap();
        assert_eq!(a, b);
    }
}
