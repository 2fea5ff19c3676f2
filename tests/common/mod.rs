#![allow(dead_code)]

use bytes::{BufMut, BytesMut};
use ipfix_walk::{FieldSpecifier, MessageHeader, WalkError};

const REFERENCE_CAPTURE: &str = include_str!("../data/reference_capture.hex");

/// Single message from a flow meter: two templates (259 with 15 fields, 260 with 16 fields)
/// and seven data sets holding 25 records.
pub fn reference_capture() -> Vec<u8>
{
    let text: String = REFERENCE_CAPTURE.split_whitespace().collect();
    hex::decode(text).unwrap()
}

/// Field instances in the reference capture.
pub const REFERENCE_FIELDS: usize = 15 * 14 + 16 + 15 + 16 * 2 + 15 * 2 + 16 + 15 * 4;

/// Records in the reference capture.
pub const REFERENCE_RECORDS: usize = 14 + 1 + 1 + 2 + 2 + 1 + 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field
{
    pub domain_id: u32,
    pub enterprise_id: u32,
    pub field_id: u16,
    pub value: Vec<u8>,
}

#[derive(Debug)]
pub enum TestError
{
    Walk(WalkError),
    Handler(&'static str),
}

impl From<WalkError> for TestError
{
    fn from(e: WalkError) -> Self
    {
        TestError::Walk(e)
    }
}

/// Handler storing every reported field.
pub fn collect(
    fields: &mut Vec<Field>,
) -> impl FnMut(&MessageHeader, u32, u16, &[u8]) -> Result<(), TestError> + '_
{
    move |header: &MessageHeader, enterprise_id: u32, field_id: u16, value: &[u8]| {
        fields.push(Field {
            domain_id: header.domain_id,
            enterprise_id,
            field_id,
            value: value.to_vec(),
        });
        Ok(())
    }
}

/// Builds IPFIX messages set by set.
pub struct MessageBuilder
{
    domain_id: u32,
    sequence_number: u32,
    sets: BytesMut,
}

impl MessageBuilder
{
    pub fn new(domain_id: u32) -> Self
    {
        MessageBuilder {
            domain_id,
            sequence_number: 0,
            sets: BytesMut::new(),
        }
    }

    pub fn sequence_number(mut self, sequence_number: u32) -> Self
    {
        self.sequence_number = sequence_number;
        self
    }

    /// Appends a set with a raw body.
    pub fn set(mut self, set_id: u16, body: &[u8]) -> Self
    {
        self.sets.put_u16(set_id);
        self.sets.put_u16((body.len() + 4) as u16);
        self.sets.put_slice(body);
        self
    }

    /// Appends a template set defining one template.
    pub fn template(self, template_id: u16, fields: &[FieldSpecifier]) -> Self
    {
        let mut body = BytesMut::new();
        body.put_u16(template_id);
        body.put_u16(fields.len() as u16);
        put_specifiers(&mut body, fields);
        self.set(2, &body)
    }

    /// Appends an options template set defining one options template.
    pub fn options_template(
        self,
        template_id: u16,
        scope_field_count: u16,
        fields: &[FieldSpecifier],
    ) -> Self
    {
        let mut body = BytesMut::new();
        body.put_u16(template_id);
        body.put_u16(fields.len() as u16);
        body.put_u16(scope_field_count);
        put_specifiers(&mut body, fields);
        self.set(3, &body)
    }

    /// Appends a template set withdrawing a template.
    pub fn withdraw(self, template_id: u16) -> Self
    {
        let mut body = BytesMut::new();
        body.put_u16(template_id);
        body.put_u16(0);
        self.set(2, &body)
    }

    /// Appends a data set holding the given records, concatenated.
    pub fn data(self, template_id: u16, records: &[&[u8]]) -> Self
    {
        let body: Vec<u8> = records.concat();
        self.set(template_id, &body)
    }

    pub fn build(self) -> Vec<u8>
    {
        let mut message = BytesMut::new();
        message.put_u16(10);
        message.put_u16((self.sets.len() + 16) as u16);
        message.put_u32(1576012482);
        message.put_u32(self.sequence_number);
        message.put_u32(self.domain_id);
        message.put_slice(&self.sets);
        message.to_vec()
    }
}

fn put_specifiers(body: &mut BytesMut, fields: &[FieldSpecifier])
{
    for f in fields {
        match f.enterprise_number {
            Some(pen) => {
                body.put_u16(f.field_id | 0x8000);
                body.put_u16(f.length);
                body.put_u32(pen);
            }
            None => {
                body.put_u16(f.field_id);
                body.put_u16(f.length);
            }
        }
    }
}
