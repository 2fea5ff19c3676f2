//! Errors raised while walking IPFIX messages.

use snafu::Snafu;

/// IPFIX decoding error.
///
/// Most variants abort the walk since the byte alignment of the message can no longer be trusted
/// past the offending structure. The variants for which [`WalkError::is_recoverable`] returns
/// `true` only cause the current set to be skipped; the walker logs them and never returns them.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum WalkError
{
    /// Fewer than 16 bytes were available for the message header.
    #[snafu(display("Message header truncated: {} of 16 bytes available", available))]
    TruncatedHeader
    {
        /// Bytes available in the buffer.
        available: usize,
    },

    /// The message header carried a version other than IPFIX.
    #[snafu(display("Unsupported message version {}, expected 10", version))]
    UnsupportedVersion
    {
        /// Version found in the header.
        version: u16,
    },

    /// The message length declared in the header is smaller than the header itself.
    #[snafu(display("Invalid message length {}", length))]
    InvalidMessageLength
    {
        /// Declared message length.
        length: u16,
    },

    /// A set length is below the set header size or runs past the end of the message.
    #[snafu(display(
        "Invalid length {} for set {}, {} bytes left in message",
        length,
        set_id,
        available
    ))]
    InvalidSetLength
    {
        /// Set ID.
        set_id: u16,

        /// Declared set length, including the set header.
        length: u16,

        /// Bytes left in the message, including the set header.
        available: usize,
    },

    /// The set ID is reserved. The set is skipped.
    #[snafu(display("Reserved set id {}", set_id))]
    UnknownSetType
    {
        /// Set ID.
        set_id: u16,
    },

    /// A data set referenced a template that was never defined or has been evicted. The set is
    /// skipped.
    #[snafu(display("Unknown template {} in observation domain {}", template_id, domain_id))]
    UnknownTemplate
    {
        /// Observation domain of the message.
        domain_id: u32,

        /// Template ID, equal to the data set ID.
        template_id: u16,
    },

    /// A data set referenced a template whose records have no length. The set is skipped.
    #[snafu(display("Template {} cannot delimit records: every field is empty", template_id))]
    ZeroLengthTemplate
    {
        /// Template ID.
        template_id: u16,
    },

    /// A template record runs past the end of its set.
    #[snafu(display(
        "Template record {} truncated: {} bytes needed, {} available",
        template_id,
        needed,
        available
    ))]
    TruncatedTemplate
    {
        /// Template ID, or 0 when the record header itself was cut.
        template_id: u16,

        /// Bytes needed to finish the record.
        needed: usize,

        /// Bytes left in the set.
        available: usize,
    },

    /// A template record defines a template in the reserved ID range.
    #[snafu(display("Invalid template id {}", template_id))]
    InvalidTemplateId
    {
        /// Template ID.
        template_id: u16,
    },

    /// An options template record declares no scope fields or more scope fields than fields.
    #[snafu(display(
        "Options template {} declares {} scope fields out of {}",
        template_id,
        scope_count,
        field_count
    ))]
    InvalidScopeCount
    {
        /// Template ID.
        template_id: u16,

        /// Declared scope field count.
        scope_count: u16,

        /// Declared field count.
        field_count: u16,
    },

    /// A field value runs past the available bytes.
    #[snafu(display(
        "Field {} truncated: {} bytes needed, {} available",
        field_id,
        needed,
        available
    ))]
    TruncatedField
    {
        /// Field ID.
        field_id: u16,

        /// Bytes needed, including any variable length prefix.
        needed: usize,

        /// Bytes available.
        available: usize,
    },

    /// A data record runs past the end of its set.
    #[snafu(display("Record {} of template {} truncated: {}", record, template_id, source))]
    TruncatedRecord
    {
        /// Template ID of the data set.
        template_id: u16,

        /// Zero-based index of the record within its set.
        record: usize,

        /// The field that could not be read.
        #[snafu(source(from(WalkError, Box::new)))]
        source: Box<WalkError>,
    },

    /// A declared length exceeds the size bound configured for the walker.
    #[snafu(display("Declared length {} exceeds the limit of {} bytes", length, limit))]
    OversizedMessage
    {
        /// Declared length.
        length: usize,

        /// Configured limit.
        limit: usize,
    },

    /// The walker was constructed with unusable parameters.
    #[snafu(display("Invalid walker configuration: {}", reason))]
    InvalidConfig
    {
        /// What was wrong.
        reason: &'static str,
    },
}

impl WalkError
{
    /// Returns true for conditions that only skip the current set.
    ///
    /// The walker resynchronizes at the next set boundary after these and continues with the rest
    /// of the message.
    pub fn is_recoverable(&self) -> bool
    {
        matches!(
            self,
            WalkError::UnknownSetType { .. }
                | WalkError::UnknownTemplate { .. }
                | WalkError::ZeroLengthTemplate { .. }
        )
    }
}
