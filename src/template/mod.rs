//! Templates and the field specifiers they are made of.

mod parse;
mod store;

pub(crate) use parse::{TemplateRecord, TEMPLATE_RECORD_HEADER_LENGTH};
pub use store::TemplateStore;

/// Field length marking a variable length field.
pub const VARIABLE_LENGTH: u16 = 65535;

/// Lowest template ID usable for data sets.
pub const MIN_TEMPLATE_ID: u16 = 256;

pub(crate) const ENTERPRISE_BIT: u16 = 0x8000;

/// Field specifier of a template.
///
/// Describes the type and size of one field of the data records using the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpecifier
{
    /// Information element ID, with the enterprise bit cleared.
    pub field_id: u16,

    /// Declared length in bytes, or [`VARIABLE_LENGTH`].
    pub length: u16,

    /// Enterprise number for enterprise-specific information elements.
    pub enterprise_number: Option<u32>,
}

impl FieldSpecifier
{
    /// Creates an IANA field specifier.
    pub fn new(field_id: u16, length: u16) -> Self
    {
        FieldSpecifier {
            field_id: field_id & !ENTERPRISE_BIT,
            length,
            enterprise_number: None,
        }
    }

    /// Creates an enterprise-specific field specifier.
    pub fn enterprise(enterprise_number: u32, field_id: u16, length: u16) -> Self
    {
        FieldSpecifier {
            enterprise_number: Some(enterprise_number),
            ..FieldSpecifier::new(field_id, length)
        }
    }

    /// Enterprise ID reported for the field; 0 for IANA fields.
    pub fn enterprise_id(&self) -> u32
    {
        self.enterprise_number.unwrap_or(0)
    }

    /// True, if the length of the field is carried by every record.
    pub fn is_variable_length(&self) -> bool
    {
        self.length == VARIABLE_LENGTH
    }

    /// Smallest number of bytes the field can occupy in a record.
    pub fn min_length(&self) -> usize
    {
        match self.is_variable_length() {
            true => 1,
            false => self.length as usize,
        }
    }
}

/// Template defining the layout of data records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template
{
    /// Template ID, equal to the set ID of data sets using the template.
    pub id: u16,

    /// Number of leading fields that are scope fields. Zero unless the template came from an
    /// options template record.
    pub scope_field_count: u16,

    fields: Vec<FieldSpecifier>,
    min_record_length: usize,
}

impl Template
{
    /// Creates a template.
    pub fn new(id: u16, fields: Vec<FieldSpecifier>) -> Self
    {
        Self::with_scope(id, 0, fields)
    }

    /// Creates an options template whose first `scope_field_count` fields are scope fields.
    pub fn with_scope(id: u16, scope_field_count: u16, fields: Vec<FieldSpecifier>) -> Self
    {
        let min_record_length = fields.iter().map(FieldSpecifier::min_length).sum();
        Template {
            id,
            scope_field_count,
            fields,
            min_record_length,
        }
    }

    /// Field specifiers in record order.
    pub fn fields(&self) -> &[FieldSpecifier]
    {
        &self.fields
    }

    /// Scope fields of an options template.
    pub fn scope_fields(&self) -> &[FieldSpecifier]
    {
        let count = (self.scope_field_count as usize).min(self.fields.len());
        &self.fields[..count]
    }

    /// True, if the template came from an options template record.
    pub fn is_options(&self) -> bool
    {
        self.scope_field_count > 0
    }

    /// Smallest number of bytes a record using this template occupies.
    pub fn min_record_length(&self) -> usize
    {
        self.min_record_length
    }
}

/// Template store key.
///
/// Template IDs are scoped to the observation domain that defined them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateKey
{
    /// Observation domain ID.
    pub domain_id: u32,

    /// Template ID.
    pub template_id: u16,
}

impl TemplateKey
{
    /// Creates a key.
    pub fn new(domain_id: u32, template_id: u16) -> Self
    {
        TemplateKey {
            domain_id,
            template_id,
        }
    }
}
