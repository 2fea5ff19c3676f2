use super::*;
use crate::error::*;
use bytes::Buf;
use snafu::ensure;

/// Smallest template record: template ID and field count.
pub(crate) const TEMPLATE_RECORD_HEADER_LENGTH: usize = 4;

/// One record of a template set or an options template set.
#[derive(Debug, PartialEq)]
pub(crate) enum TemplateRecord
{
    /// Defines or redefines a template.
    Definition(Template),

    /// Withdraws a single template.
    Withdrawal(u16),

    /// Withdraws every template of the observation domain.
    WithdrawAll,
}

impl TemplateRecord
{
    /// Parses a template record from the front of `data`.
    ///
    /// `set_id` is the ID of the enclosing set and `options` tells whether the record carries a
    /// scope field count. `data` is only advanced when a complete record was read.
    pub(crate) fn parse(data: &mut &[u8], set_id: u16, options: bool) -> Result<Self, WalkError>
    {
        ensure!(
            data.len() >= TEMPLATE_RECORD_HEADER_LENGTH,
            TruncatedTemplateSnafu {
                template_id: 0u16,
                needed: TEMPLATE_RECORD_HEADER_LENGTH,
                available: data.len()
            }
        );

        let mut cursor = *data;
        let template_id = cursor.get_u16();
        let field_count = cursor.get_u16();

        // Withdrawals carry no scope field count, even in options template sets.
        if field_count == 0 {
            let record = match template_id == set_id {
                true => TemplateRecord::WithdrawAll,
                false => {
                    ensure!(
                        template_id >= MIN_TEMPLATE_ID,
                        InvalidTemplateIdSnafu { template_id }
                    );
                    TemplateRecord::Withdrawal(template_id)
                }
            };
            *data = cursor;
            return Ok(record);
        }

        ensure!(
            template_id >= MIN_TEMPLATE_ID,
            InvalidTemplateIdSnafu { template_id }
        );

        let scope_field_count = match options {
            true => {
                ensure!(
                    cursor.len() >= 2,
                    TruncatedTemplateSnafu {
                        template_id,
                        needed: 2usize,
                        available: cursor.len()
                    }
                );
                let scope_count = cursor.get_u16();
                ensure!(
                    scope_count > 0 && scope_count <= field_count,
                    InvalidScopeCountSnafu {
                        template_id,
                        scope_count,
                        field_count
                    }
                );
                scope_count
            }
            false => 0,
        };

        // The field count is untrusted; every specifier needs at least four bytes.
        let mut fields = Vec::with_capacity((field_count as usize).min(cursor.len() / 4));
        for _ in 0..field_count {
            ensure!(
                cursor.len() >= 4,
                TruncatedTemplateSnafu {
                    template_id,
                    needed: 4usize,
                    available: cursor.len()
                }
            );
            let raw_id = cursor.get_u16();
            let length = cursor.get_u16();

            let spec = match raw_id & ENTERPRISE_BIT != 0 {
                true => {
                    ensure!(
                        cursor.len() >= 4,
                        TruncatedTemplateSnafu {
                            template_id,
                            needed: 4usize,
                            available: cursor.len()
                        }
                    );
                    FieldSpecifier::enterprise(cursor.get_u32(), raw_id, length)
                }
                false => FieldSpecifier::new(raw_id, length),
            };
            fields.push(spec);
        }

        *data = cursor;
        Ok(TemplateRecord::Definition(Template::with_scope(
            template_id,
            scope_field_count,
            fields,
        )))
    }
}

#[cfg(test)]
mod test
{
    use super::*;
    use bytes::{BufMut, BytesMut};

    #[test]
    fn template_record()
    {
        let mut payload = BytesMut::new();
        payload.put_u16(259); // Template ID.
        payload.put_u16(3); // Field count.
        payload.put_u16(8);
        payload.put_u16(4);
        payload.put_u16(0x8000 | 12); // Enterprise field.
        payload.put_u16(VARIABLE_LENGTH);
        payload.put_u32(29305);
        payload.put_u16(7);
        payload.put_u16(2);
        payload.put_slice(b"\x00\x00"); // Padding.

        let mut data = &payload[..];
        let record = TemplateRecord::parse(&mut data, 2, false).unwrap();

        assert_eq!(
            record,
            TemplateRecord::Definition(Template::new(
                259,
                vec![
                    FieldSpecifier::new(8, 4),
                    FieldSpecifier::enterprise(29305, 12, VARIABLE_LENGTH),
                    FieldSpecifier::new(7, 2),
                ]
            ))
        );
        assert_eq!(data, b"\x00\x00");
    }

    #[test]
    fn options_template_record()
    {
        let mut payload = BytesMut::new();
        payload.put_u16(300);
        payload.put_u16(2);
        payload.put_u16(1); // Scope field count.
        payload.put_u16(149);
        payload.put_u16(4);
        payload.put_u16(41);
        payload.put_u16(8);

        let record = TemplateRecord::parse(&mut &payload[..], 3, true).unwrap();
        match record {
            TemplateRecord::Definition(t) => {
                assert_eq!(t.id, 300);
                assert_eq!(t.scope_field_count, 1);
                assert_eq!(t.fields().len(), 2);
                assert_eq!(t.min_record_length(), 12);
            }
            other => panic!("Not a definition: {:?}", other),
        }
    }

    #[test]
    fn withdrawals()
    {
        let record = TemplateRecord::parse(&mut &b"\x01\x03\x00\x00"[..], 2, false).unwrap();
        assert_eq!(record, TemplateRecord::Withdrawal(259));

        let record = TemplateRecord::parse(&mut &b"\x00\x02\x00\x00"[..], 2, false).unwrap();
        assert_eq!(record, TemplateRecord::WithdrawAll);

        // Options template withdrawals have no scope field count.
        let record = TemplateRecord::parse(&mut &b"\x00\x03\x00\x00"[..], 3, true).unwrap();
        assert_eq!(record, TemplateRecord::WithdrawAll);
    }

    #[test]
    fn reserved_template_id()
    {
        match TemplateRecord::parse(&mut &b"\x00\xff\x00\x01\x00\x08\x00\x04"[..], 2, false) {
            Err(WalkError::InvalidTemplateId { template_id: 255 }) => {}
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn invalid_scope_count()
    {
        match TemplateRecord::parse(&mut &b"\x01\x2c\x00\x01\x00\x02\x00\x95\x00\x04"[..], 3, true) {
            Err(WalkError::InvalidScopeCount {
                scope_count: 2,
                field_count: 1,
                ..
            }) => {}
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn truncated_specifier()
    {
        // Enterprise bit set, but the enterprise number is cut short.
        let mut data = &b"\x01\x00\x00\x01\x80\x01\x00\x04\x00\x00"[..];
        match TemplateRecord::parse(&mut data, 2, false) {
            Err(WalkError::TruncatedTemplate {
                template_id: 256,
                needed: 4,
                available: 2,
            }) => {}
            other => panic!("Unexpected result: {:?}", other),
        }
        assert_eq!(data.len(), 10);
    }
}
