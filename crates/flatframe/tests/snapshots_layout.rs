//! Byte-exact layouts. These bytes are the wire format: any change here
//! breaks compatibility with buffers written by other producers.

use flatframe::{Builder, ForwardTable, Offset};

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn one_short_table(builder: &mut Builder) -> Offset<ForwardTable> {
    builder.start_table(1).unwrap();
    builder.add_field::<i16>(4, 80, 100).unwrap();
    builder.end_table().unwrap()
}

#[test]
fn snapshot_single_scalar() {
    let mut builder = Builder::new();
    let root = one_short_table(&mut builder);
    builder.finish(root, None).unwrap();
    insta::assert_snapshot!(hex(builder.finished_data().unwrap()), @"0c 00 00 00 00 00 06 00 08 00 06 00 06 00 00 00 00 00 50 00");
}

#[test]
fn snapshot_file_identifier() {
    let mut builder = Builder::new();
    let root = one_short_table(&mut builder);
    builder.finish(root, Some("MONS")).unwrap();
    insta::assert_snapshot!(hex(builder.finished_data().unwrap()), @"10 00 00 00 4d 4f 4e 53 00 00 06 00 08 00 06 00 06 00 00 00 00 00 50 00");
}

#[test]
fn snapshot_size_prefixed() {
    let mut builder = Builder::new();
    let root = one_short_table(&mut builder);
    builder.finish_size_prefixed(root, Some("MONS")).unwrap();
    insta::assert_snapshot!(hex(builder.finished_data().unwrap()), @"18 00 00 00 10 00 00 00 4d 4f 4e 53 00 00 06 00 08 00 06 00 06 00 00 00 00 00 50 00");
}

#[test]
fn snapshot_string_field() {
    let mut builder = Builder::new();
    let name = builder.create_string("hi").unwrap();
    builder.start_table(1).unwrap();
    builder.add_field_offset(4, name).unwrap();
    let root = builder.end_table().unwrap();
    builder.finish(root, None).unwrap();
    insta::assert_snapshot!(hex(builder.finished_data().unwrap()), @"0c 00 00 00 00 00 06 00 08 00 04 00 06 00 00 00 04 00 00 00 02 00 00 00 68 69 00 00");
}

#[test]
fn snapshot_empty_table() {
    let mut builder = Builder::new();
    builder.start_table(0).unwrap();
    let root = builder.end_table().unwrap();
    builder.finish(root, None).unwrap();
    insta::assert_snapshot!(hex(builder.finished_data().unwrap()), @"08 00 00 00 04 00 04 00 04 00 00 00");
}

#[test]
fn snapshot_is_independent_of_initial_capacity() {
    let layouts = [0, 1, 16, 4096].map(|capacity| {
        let mut builder = Builder::with_capacity(capacity);
        let root = one_short_table(&mut builder);
        builder.finish(root, Some("MONS")).unwrap();
        hex(builder.finished_data().unwrap())
    });
    assert!(layouts.windows(2).all(|pair| pair[0] == pair[1]));
}
