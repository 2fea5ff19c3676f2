//! Field value decoding.
//!
//! Values are returned as slices of the input; nothing is copied.

use crate::error::*;
use crate::template::FieldSpecifier;
use bytes::Buf;
use snafu::ensure;

/// Length prefix value announcing that a two byte length follows.
pub const LONG_LENGTH_ESCAPE: u8 = 255;

impl FieldSpecifier
{
    /// Reads one value of the field from the front of `data`.
    ///
    /// Fixed length fields take exactly the declared number of bytes. Variable length fields
    /// start with a one byte length, or with [`LONG_LENGTH_ESCAPE`] followed by a two byte big
    /// endian length. The returned slice excludes the length prefix.
    ///
    /// Lengths above `limit` fail with [`WalkError::OversizedMessage`] and lengths running past
    /// the end of `data` with [`WalkError::TruncatedField`]. `data` is only advanced on success.
    pub fn read_value<'a>(&self, data: &mut &'a [u8], limit: usize) -> Result<&'a [u8], WalkError>
    {
        let original = *data;
        let mut cursor = original;

        let (length, prefix) = match self.is_variable_length() {
            true => read_variable_length(&mut cursor, self.field_id)?,
            false => (self.length as usize, 0),
        };

        ensure!(length <= limit, OversizedMessageSnafu { length, limit });
        ensure!(
            cursor.len() >= length,
            TruncatedFieldSnafu {
                field_id: self.field_id,
                needed: prefix + length,
                available: original.len()
            }
        );

        let (value, remainder) = cursor.split_at(length);
        *data = remainder;
        Ok(value)
    }
}

/// Reads a variable length prefix, returning the value length and the prefix length.
fn read_variable_length(data: &mut &[u8], field_id: u16) -> Result<(usize, usize), WalkError>
{
    ensure!(
        !data.is_empty(),
        TruncatedFieldSnafu {
            field_id,
            needed: 1usize,
            available: 0usize
        }
    );

    match data.get_u8() {
        LONG_LENGTH_ESCAPE => {
            ensure!(
                data.len() >= 2,
                TruncatedFieldSnafu {
                    field_id,
                    needed: 3usize,
                    available: data.len() + 1
                }
            );
            Ok((data.get_u16() as usize, 3))
        }
        short => Ok((short as usize, 1)),
    }
}
