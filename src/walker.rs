//! Message walking.
//!
//! The [`Walker`] decodes one IPFIX message per [`Walker::walk_buffer`] call and reports every
//! decoded field to a [`FieldHandler`]. Templates learned from a message stay available to the
//! following messages walked by the same walker.

use crate::error::*;
use crate::filter::Filter;
use crate::header::{MessageHeader, IPFIX_VERSION};
use crate::set::{Set, SetKind, SET_HEADER_LENGTH, TEMPLATE_SET_ID};
use crate::template::{TemplateRecord, TemplateStore, TEMPLATE_RECORD_HEADER_LENGTH};
use snafu::{ensure, OptionExt};
use std::num::NonZeroUsize;
use tracing::{debug, trace};

/// Default number of templates a walker keeps.
pub const DEFAULT_TEMPLATE_CAPACITY: usize = 1024;

/// Default size bound, the largest message an IPFIX header can describe.
pub const DEFAULT_MAX_SIZE: usize = u16::MAX as usize;

const MAX_PRESIZED_FIELDS: usize = 1024;

/// Consumer of decoded fields.
///
/// Implemented for every `FnMut(&MessageHeader, u32, u16, &[u8]) -> Result<(), E>` closure.
///
/// The error type must be constructible from a [`WalkError`]: decode errors are converted into
/// it, while errors returned by the handler itself are passed to the caller of
/// [`Walker::walk_buffer`] as they are.
pub trait FieldHandler
{
    /// Error returned by the handler and by the walk.
    type Error: From<WalkError>;

    /// Handles one decoded field.
    ///
    /// `value` borrows the walked buffer and is only valid during the call. Returning an error
    /// aborts the walk.
    fn handle_field(
        &mut self,
        header: &MessageHeader,
        enterprise_id: u32,
        field_id: u16,
        value: &[u8],
    ) -> Result<(), Self::Error>;
}

impl<F, E> FieldHandler for F
where
    F: FnMut(&MessageHeader, u32, u16, &[u8]) -> Result<(), E>,
    E: From<WalkError>,
{
    type Error = E;

    fn handle_field(
        &mut self,
        header: &MessageHeader,
        enterprise_id: u32,
        field_id: u16,
        value: &[u8],
    ) -> Result<(), E>
    {
        self(header, enterprise_id, field_id, value)
    }
}

/// Walker construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkerConfig
{
    /// Maximum number of templates kept across all observation domains.
    pub template_capacity: usize,

    /// Largest set or field length accepted. Larger declared lengths fail the walk with
    /// [`WalkError::OversizedMessage`].
    pub max_size: usize,
}

impl Default for WalkerConfig
{
    fn default() -> Self
    {
        WalkerConfig {
            template_capacity: DEFAULT_TEMPLATE_CAPACITY,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

/// Location of one field of the current record within its data set.
#[derive(Debug, Clone, Copy)]
struct FieldRange
{
    enterprise_id: u32,
    field_id: u16,
    start: usize,
    end: usize,
}

/// Why a set could not be walked.
enum SetError<E>
{
    Decode(WalkError),
    Handler(E),
}

impl<E> From<WalkError> for SetError<E>
{
    fn from(err: WalkError) -> Self
    {
        SetError::Decode(err)
    }
}

/// IPFIX message walker.
///
/// ```
/// use ipfix_walk::{Filter, MessageHeader, Walker, WalkError};
///
/// let message = b"\x00\x0a\x00\x24\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
///                 \x00\x02\x00\x0c\x01\x00\x00\x01\x00\x08\x00\x04\
///                 \x01\x00\x00\x08\x0a\x00\x00\x01";
///
/// let mut addresses = vec![];
/// let handler = |_: &MessageHeader, _: u32, _: u16, value: &[u8]| -> Result<(), WalkError> {
///     addresses.push(value.to_vec());
///     Ok(())
/// };
///
/// let filter: Filter = vec![(0, 8)].into_iter().collect();
/// let mut walker = Walker::new(Some(filter), handler, 16, 1024).unwrap();
/// walker.walk_buffer(message).unwrap();
/// drop(walker);
///
/// assert_eq!(addresses, vec![vec![10, 0, 0, 1]]);
/// ```
pub struct Walker<H>
{
    filter: Option<Filter>,
    handler: H,
    templates: TemplateStore,
    max_size: usize,
    scratch: Vec<FieldRange>,
}

impl<H: FieldHandler> Walker<H>
{
    /// Creates a walker.
    ///
    /// `filter` selects the reported fields; `None` reports every field. `template_capacity`
    /// bounds the number of templates kept and `max_size` bounds every declared set and field
    /// length. Both must be non-zero.
    pub fn new(
        filter: Option<Filter>,
        handler: H,
        template_capacity: usize,
        max_size: usize,
    ) -> Result<Self, WalkError>
    {
        Self::with_config(
            filter,
            handler,
            WalkerConfig {
                template_capacity,
                max_size,
            },
        )
    }

    /// Creates a walker from a [`WalkerConfig`].
    pub fn with_config(
        filter: Option<Filter>,
        handler: H,
        config: WalkerConfig,
    ) -> Result<Self, WalkError>
    {
        let capacity = NonZeroUsize::new(config.template_capacity).context(InvalidConfigSnafu {
            reason: "template capacity must be non-zero",
        })?;
        ensure!(
            config.max_size > 0,
            InvalidConfigSnafu {
                reason: "size bound must be non-zero"
            }
        );
        if let Some(filter) = &filter {
            ensure!(
                filter.version() == 0 || filter.version() == IPFIX_VERSION,
                InvalidConfigSnafu {
                    reason: "filter is not for IPFIX"
                }
            );
        }

        // Every field specifier takes at least four bytes of a template set.
        let scratch = Vec::with_capacity((config.max_size / 4).min(MAX_PRESIZED_FIELDS));

        Ok(Walker {
            filter,
            handler,
            templates: TemplateStore::new(capacity),
            max_size: config.max_size,
            scratch,
        })
    }

    /// Walks one IPFIX message.
    ///
    /// Every accepted field of every decodable data record is passed to the handler, in wire
    /// order. Sets with a reserved ID and data sets without a known template are skipped. Any
    /// other decoding error, or the first handler error, stops the walk and is returned; fields
    /// reported before that point are not taken back.
    pub fn walk_buffer(&mut self, buf: &[u8]) -> Result<(), H::Error>
    {
        let mut data = buf;
        let header = MessageHeader::parse(&mut data)?;
        let mut sets = &data[..header.body_length(data.len())];

        trace!(
            message = "Walking message.",
            domain_id = header.domain_id,
            sequence_number = header.sequence_number,
            length = header.length
        );

        while sets.len() >= SET_HEADER_LENGTH {
            let set = Set::parse(&mut sets, self.max_size)?;
            match self.walk_set(&header, set) {
                Ok(()) => {}
                Err(SetError::Decode(error)) if error.is_recoverable() => {
                    debug!(
                        message = "Skipping set.",
                        set_id = set.id,
                        domain_id = header.domain_id,
                        %error
                    );
                }
                Err(SetError::Decode(error)) => return Err(error.into()),
                Err(SetError::Handler(error)) => return Err(error),
            }
        }

        if !sets.is_empty() {
            trace!(message = "Ignoring message padding.", bytes = sets.len());
        }

        Ok(())
    }

    fn walk_set(&mut self, header: &MessageHeader, set: Set<'_>)
        -> Result<(), SetError<H::Error>>
    {
        match set.kind() {
            SetKind::Template => self.apply_templates(header.domain_id, set, false)?,
            SetKind::OptionsTemplate => self.apply_templates(header.domain_id, set, true)?,
            SetKind::Data(template_id) => self.walk_data_set(header, template_id, set.body)?,
            SetKind::Reserved(set_id) => return Err(UnknownSetTypeSnafu { set_id }.build().into()),
        }
        Ok(())
    }

    fn apply_templates(&mut self, domain_id: u32, set: Set<'_>, options: bool)
        -> Result<(), WalkError>
    {
        let mut body = set.body;

        // Anything shorter than a record header is set padding.
        while body.len() >= TEMPLATE_RECORD_HEADER_LENGTH {
            match TemplateRecord::parse(&mut body, set.id, options)? {
                TemplateRecord::Definition(template) => {
                    trace!(
                        message = "Learned template.",
                        domain_id,
                        template_id = template.id,
                        fields = template.fields().len()
                    );
                    self.templates.insert(domain_id, template);
                }
                TemplateRecord::Withdrawal(template_id) => {
                    debug!(message = "Template withdrawn.", domain_id, template_id);
                    self.templates.remove(domain_id, template_id);
                }
                TemplateRecord::WithdrawAll => {
                    let removed = self.templates.remove_domain(domain_id);
                    debug!(
                        message = "All templates withdrawn.",
                        domain_id,
                        removed,
                        options = set.id != TEMPLATE_SET_ID
                    );
                }
            }
        }

        Ok(())
    }

    fn walk_data_set(&mut self, header: &MessageHeader, template_id: u16, body: &[u8])
        -> Result<(), SetError<H::Error>>
    {
        if body.is_empty() {
            return Ok(());
        }

        let Walker {
            filter,
            handler,
            templates,
            max_size,
            scratch,
        } = self;

        let template = templates
            .get(header.domain_id, template_id)
            .context(UnknownTemplateSnafu {
                domain_id: header.domain_id,
                template_id,
            })?;
        let min_record_length = template.min_record_length();
        ensure!(min_record_length > 0, ZeroLengthTemplateSnafu { template_id });

        let mut cursor = body;
        let mut record = 0;
        while !cursor.is_empty() {
            if cursor.len() < min_record_length && cursor.iter().all(|b| *b == 0) {
                trace!(message = "Ignoring set padding.", template_id, bytes = cursor.len());
                break;
            }

            // Locate every field of the record before reporting any of them, so a truncated
            // record reports nothing.
            scratch.clear();
            for spec in template.fields() {
                let value = spec.read_value(&mut cursor, *max_size).map_err(|e| match e {
                    e @ WalkError::TruncatedField { .. } => WalkError::TruncatedRecord {
                        template_id,
                        record,
                        source: Box::new(e),
                    },
                    e => e,
                })?;

                let enterprise_id = spec.enterprise_id();
                let accepted = filter
                    .as_ref()
                    .map_or(true, |f| f.accepts(enterprise_id, spec.field_id));
                if accepted {
                    let end = body.len() - cursor.len();
                    scratch.push(FieldRange {
                        enterprise_id,
                        field_id: spec.field_id,
                        start: end - value.len(),
                        end,
                    });
                }
            }

            for field in scratch.iter() {
                handler
                    .handle_field(
                        header,
                        field.enterprise_id,
                        field.field_id,
                        &body[field.start..field.end],
                    )
                    .map_err(SetError::Handler)?;
            }
            record += 1;
        }

        Ok(())
    }

    /// Templates learned so far.
    pub fn templates(&self) -> &TemplateStore
    {
        &self.templates
    }

    /// Forgets every learned template, e.g. after the exporter restarted.
    pub fn clear_templates(&mut self)
    {
        self.templates.clear()
    }

    /// Filter in use, if any.
    pub fn filter(&self) -> Option<&Filter>
    {
        self.filter.as_ref()
    }

    /// Size bound of the walker.
    pub fn max_size(&self) -> usize
    {
        self.max_size
    }

    /// The field handler.
    pub fn handler(&self) -> &H
    {
        &self.handler
    }

    /// The field handler, mutably.
    pub fn handler_mut(&mut self) -> &mut H
    {
        &mut self.handler
    }

    /// Consumes the walker, returning the field handler.
    pub fn into_handler(self) -> H
    {
        self.handler
    }
}

impl<H> std::fmt::Debug for Walker<H>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        f.debug_struct("Walker")
            .field("filter", &self.filter)
            .field("templates", &self.templates)
            .field("max_size", &self.max_size)
            .finish_non_exhaustive()
    }
}
