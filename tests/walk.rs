mod common;

use common::*;
use ipfix_walk::{registry, Filter, MessageHeader, WalkError, Walker};

#[test]
fn walk_reference_capture()
{
    let mut f = Filter::new();
    f.set_version(10);
    f.set_domain_id(0);

    let expected: &[(u16, &[u8])] = &[
        (8, b"\x7f\x00\x00\x01"),
        (12, b"\x7f\x00\x00\x01"),
        (15, b"\x00\x00\x00\x00"),
        (7, b"\xb5\x9f"),
        (11, b"\x08\x07"),
        (6, b"\x00"),
    ];

    let mut count = 0;
    let handler = |_: &MessageHeader, eid: u32, fid: u16, value: &[u8]| -> Result<(), TestError> {
        if eid != 0 {
            return Err(TestError::Handler("invalid enterprise id"));
        }
        let element = registry::lookup(eid, fid).ok_or(TestError::Handler("unknown type"))?;
        if value.len() < element.data_type.min_length() {
            return Err(TestError::Handler("value too short for its type"));
        }
        if let Some((id, data)) = expected.get(count) {
            assert_eq!(fid, *id, "field {}", count);
            assert_eq!(value, *data, "field {}", count);
        }
        count += 1;
        Ok(())
    };

    let mut walker = Walker::new(Some(f), handler, 16, 1024).unwrap();
    walker.walk_buffer(&reference_capture()).unwrap();
    assert_eq!(walker.templates().len(), 2);
    drop(walker);

    assert_eq!(count, REFERENCE_FIELDS);
}

#[test]
fn walk_reference_capture_with_filter()
{
    let mut f = Filter::new();
    f.set_version(10);
    f.set_domain_id(0);
    f.set(0, 0x8);
    f.set(0, 12);

    let mut fields = vec![];
    let mut walker = Walker::new(Some(f), collect(&mut fields), 16, 1024).unwrap();
    walker.walk_buffer(&reference_capture()).unwrap();
    drop(walker);

    assert_eq!(fields.len(), 2 * REFERENCE_RECORDS);
    for (i, pair) in fields.chunks(2).enumerate() {
        assert_eq!(pair[0].field_id, 8, "record {}", i);
        assert_eq!(pair[1].field_id, 12, "record {}", i);
        assert!(pair.iter().all(|f| f.enterprise_id == 0 && f.value.len() == 4));
    }

    // 192.168.122.1 -> 192.168.122.255 is the third record of the first data set.
    assert_eq!(fields[4].value, vec![192, 168, 122, 1]);
    assert_eq!(fields[5].value, vec![192, 168, 122, 255]);
}

#[test]
fn filtered_walk_reports_subset()
{
    let capture = reference_capture();

    let mut all = vec![];
    let mut walker = Walker::new(None, collect(&mut all), 16, 1024).unwrap();
    walker.walk_buffer(&capture).unwrap();
    drop(walker);

    let filter: Filter = vec![(0, 7), (0, 11), (0, 209)].into_iter().collect();
    let mut some = vec![];
    let mut walker = Walker::new(Some(filter.clone()), collect(&mut some), 16, 1024).unwrap();
    walker.walk_buffer(&capture).unwrap();
    drop(walker);

    let expected: Vec<_> = all
        .into_iter()
        .filter(|f| filter.accepts(f.enterprise_id, f.field_id))
        .collect();
    assert_eq!(some, expected);

    // Field 209 only exists in template 260, used by four records.
    assert_eq!(some.iter().filter(|f| f.field_id == 209).count(), 4);
}

#[test]
fn walk_is_deterministic()
{
    let capture = reference_capture();

    let mut first = vec![];
    let mut walker = Walker::new(None, collect(&mut first), 16, 1024).unwrap();
    walker.walk_buffer(&capture).unwrap();
    drop(walker);

    let mut second = vec![];
    let mut walker = Walker::new(None, collect(&mut second), 16, 1024).unwrap();
    walker.walk_buffer(&capture).unwrap();
    drop(walker);

    assert_eq!(first.len(), REFERENCE_FIELDS);
    assert_eq!(first, second);
}

#[test]
fn rewalking_with_learned_templates()
{
    let capture = reference_capture();

    let mut count = 0;
    let handler = |_: &MessageHeader, _: u32, _: u16, _: &[u8]| -> Result<(), WalkError> {
        count += 1;
        Ok(())
    };
    let mut walker = Walker::new(None, handler, 16, 1024).unwrap();
    for _ in 0..3 {
        walker.walk_buffer(&capture).unwrap();
    }
    drop(walker);

    assert_eq!(count, 3 * REFERENCE_FIELDS);
}

#[test]
fn handler_error_aborts_walk()
{
    let mut count = 0;
    let handler = |_: &MessageHeader, _: u32, _: u16, _: &[u8]| -> Result<(), TestError> {
        count += 1;
        match count {
            20 => Err(TestError::Handler("stop")),
            _ => Ok(()),
        }
    };

    let mut walker = Walker::new(None, handler, 16, 1024).unwrap();
    match walker.walk_buffer(&reference_capture()) {
        Err(TestError::Handler("stop")) => {}
        other => panic!("Unexpected result: {:?}", other),
    }
    drop(walker);

    assert_eq!(count, 20);
}

#[test]
fn truncated_capture()
{
    // Cut the capture inside the second data set. Everything before it is walked, then the set
    // header claims more bytes than the capture holds.
    let capture = reference_capture();
    let cut = 16 + 0x44 + 0x2a4 + 0x48 + 20;

    let mut fields = vec![];
    let mut walker = Walker::new(None, collect(&mut fields), 16, 1024).unwrap();
    match walker.walk_buffer(&capture[..cut]) {
        Err(TestError::Walk(WalkError::InvalidSetLength {
            set_id: 260,
            length: 56,
            available: 20,
        })) => {}
        other => panic!("Unexpected result: {:?}", other),
    }
    drop(walker);

    assert_eq!(fields.len(), 15 * 14);
}

#[test]
fn capture_cut_at_set_boundary()
{
    let capture = reference_capture();
    let cut = 16 + 0x44 + 0x2a4;

    let mut fields = vec![];
    let mut walker = Walker::new(None, collect(&mut fields), 16, 1024).unwrap();
    walker.walk_buffer(&capture[..cut]).unwrap();
    drop(walker);

    assert_eq!(fields.len(), 15 * 14);
}
