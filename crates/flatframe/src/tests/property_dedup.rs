use alloc::{string::String, vec::Vec};

use quickcheck::QuickCheck;

use super::quickcheck_tests;
use crate::{Builder, BuilderOptions, ForwardStr, ForwardTable, root_as_table};

/// Property: tables of one shape share a single vtable, and every table
/// still reads its own values.
#[test]
fn same_shape_shares_vtable_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(pairs: Vec<(i32, i32)>) -> bool {
        let mut builder = Builder::with_options(BuilderOptions {
            force_defaults: true,
            ..BuilderOptions::default()
        });
        let tables = pairs
            .iter()
            .map(|&(a, b)| {
                builder.start_table(2).unwrap();
                builder.add_field::<i32>(4, a, 0).unwrap();
                builder.add_field::<i32>(6, b, 0).unwrap();
                builder.end_table().unwrap()
            })
            .collect::<Vec<_>>();
        if builder.vtable_count() != usize::from(!pairs.is_empty()) {
            return false;
        }
        let vector = builder.create_vector_of_offsets(&tables).unwrap();
        builder.start_table(1).unwrap();
        builder.add_field_offset(4, vector).unwrap();
        let root = builder.end_table().unwrap();
        builder.finish(root, None).unwrap();

        let buf = builder.finished_data().unwrap();
        let read = root_as_table(buf)
            .unwrap()
            .get_vector::<ForwardTable>(4)
            .unwrap();
        let vtables = read
            .iter()
            .map(|t| t.vtable().position())
            .collect::<Vec<_>>();
        let values = read
            .iter()
            .map(|t| (t.get::<i32>(4, 0), t.get::<i32>(6, 0)))
            .collect::<Vec<_>>();
        vtables.windows(2).all(|pair| pair[0] == pair[1]) && values == pairs
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Vec<(i32, i32)>) -> bool);
}

/// Property: shared strings are stored once per content and read back
/// intact.
#[test]
fn shared_strings_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(strings: Vec<String>) -> bool {
        let mut builder = Builder::new();
        let mut offsets = Vec::new();
        for s in &strings {
            let first = builder.create_shared_string(s).unwrap();
            if builder.create_shared_string(s).unwrap() != first {
                return false;
            }
            offsets.push(first);
        }
        let distinct_content_distinct_offset = strings.iter().zip(&offsets).all(|(a, oa)| {
            strings
                .iter()
                .zip(&offsets)
                .all(|(b, ob)| (a == b) == (oa == ob))
        });

        let vector = builder.create_vector_of_offsets(&offsets).unwrap();
        builder.start_table(1).unwrap();
        builder.add_field_offset(4, vector).unwrap();
        let root = builder.end_table().unwrap();
        builder.finish(root, None).unwrap();
        let buf = builder.finished_data().unwrap();
        let read = root_as_table(buf)
            .unwrap()
            .get_vector::<ForwardStr>(4)
            .unwrap();
        distinct_content_distinct_offset
            && read.iter().zip(&strings).all(|(r, s)| r == s.as_str())
            && read.len() == strings.len()
    }

    QuickCheck::new()
        .tests(quickcheck_tests() / 10)
        .quickcheck(prop as fn(Vec<String>) -> bool);
}
