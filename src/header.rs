//! IPFIX message header.

use crate::error::*;
use bytes::Buf;
use snafu::ensure;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Version number carried by every IPFIX message.
pub const IPFIX_VERSION: u16 = 10;

/// Size of the message header on the wire.
pub const HEADER_LENGTH: usize = 16;

/// Decoded IPFIX message header.
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |       Version Number          |            Length             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           Export Time                         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                       Sequence Number                         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                    Observation Domain ID                      |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader
{
    /// Protocol version, always [`IPFIX_VERSION`].
    pub version: u16,

    /// Total message length in bytes, including this header.
    pub length: u16,

    /// Export time in seconds since the UNIX epoch.
    pub export_time: u32,

    /// Sequence number of the first data record in the message.
    pub sequence_number: u32,

    /// Observation domain the message originates from.
    pub domain_id: u32,
}

impl MessageHeader
{
    /// Parses a message header from the front of `data`.
    ///
    /// On success exactly [`HEADER_LENGTH`] bytes are consumed. On failure `data` is left
    /// untouched.
    pub fn parse(data: &mut &[u8]) -> Result<Self, WalkError>
    {
        ensure!(
            data.len() >= HEADER_LENGTH,
            TruncatedHeaderSnafu {
                available: data.len()
            }
        );

        let mut cursor = *data;
        let header = MessageHeader {
            version: cursor.get_u16(),
            length: cursor.get_u16(),
            export_time: cursor.get_u32(),
            sequence_number: cursor.get_u32(),
            domain_id: cursor.get_u32(),
        };

        ensure!(
            header.version == IPFIX_VERSION,
            UnsupportedVersionSnafu {
                version: header.version
            }
        );
        ensure!(
            header.length as usize >= HEADER_LENGTH,
            InvalidMessageLengthSnafu {
                length: header.length
            }
        );

        *data = cursor;
        Ok(header)
    }

    /// Number of bytes following the header that belong to the message, given `available`
    /// bytes actually present after the header.
    ///
    /// A capture may be cut short of the declared length, in which case only the bytes present
    /// are walked.
    pub fn body_length(&self, available: usize) -> usize
    {
        (self.length as usize).saturating_sub(HEADER_LENGTH).min(available)
    }

    /// Export time as a `SystemTime`.
    pub fn exported_at(&self) -> SystemTime
    {
        UNIX_EPOCH + Duration::from_secs(u64::from(self.export_time))
    }
}
