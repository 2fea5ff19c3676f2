//! Set headers and set classification.

use crate::error::*;
use crate::template::MIN_TEMPLATE_ID;
use bytes::Buf;
use snafu::ensure;

/// Set ID of template sets.
pub const TEMPLATE_SET_ID: u16 = 2;

/// Set ID of options template sets.
pub const OPTIONS_TEMPLATE_SET_ID: u16 = 3;

/// Size of the set header on the wire.
pub const SET_HEADER_LENGTH: usize = 4;

/// Kind of a set, derived from its ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetKind
{
    /// Template set, carrying template records.
    Template,

    /// Options template set, carrying options template records.
    OptionsTemplate,

    /// Data set, carrying data records of the template with the given ID.
    Data(u16),

    /// Reserved set ID.
    Reserved(u16),
}

impl From<u16> for SetKind
{
    fn from(set_id: u16) -> Self
    {
        match set_id {
            TEMPLATE_SET_ID => SetKind::Template,
            OPTIONS_TEMPLATE_SET_ID => SetKind::OptionsTemplate,
            id if id >= MIN_TEMPLATE_ID => SetKind::Data(id),
            id => SetKind::Reserved(id),
        }
    }
}

/// A set split from the message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Set<'a>
{
    /// Set ID.
    pub id: u16,

    /// Set contents, without the set header.
    pub body: &'a [u8],
}

impl<'a> Set<'a>
{
    /// Splits the next set from the front of `data`.
    ///
    /// Fails when the declared length is smaller than the set header, runs past the end of
    /// `data` or exceeds `limit`. `data` is only advanced on success.
    pub fn parse(data: &mut &'a [u8], limit: usize) -> Result<Self, WalkError>
    {
        let available = data.len();
        ensure!(
            available >= SET_HEADER_LENGTH,
            InvalidSetLengthSnafu {
                set_id: 0u16,
                length: 0u16,
                available
            }
        );

        let mut cursor = *data;
        let id = cursor.get_u16();
        let length = cursor.get_u16();

        ensure!(
            length as usize <= limit,
            OversizedMessageSnafu {
                length: length as usize,
                limit
            }
        );
        ensure!(
            length as usize >= SET_HEADER_LENGTH && length as usize <= available,
            InvalidSetLengthSnafu {
                set_id: id,
                length,
                available
            }
        );

        let (body, remainder) = cursor.split_at(length as usize - SET_HEADER_LENGTH);
        *data = remainder;
        Ok(Set { id, body })
    }

    /// Kind of the set.
    pub fn kind(&self) -> SetKind
    {
        SetKind::from(self.id)
    }
}
