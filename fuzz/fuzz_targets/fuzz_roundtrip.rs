#![no_main]
use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use flatframe::{
    Builder, BuilderOptions, ForwardTable, StrKey, VTable, follow_uoffset, read_string_bytes,
    root_as_table, vtable_position,
};
use libfuzzer_sys::fuzz_target;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const NAME: u16 = 4;
const LEVEL: u16 = 6;
const BONUS: u16 = 8;

#[derive(Debug, Arbitrary)]
struct Input {
    records: Vec<(String, i32, Option<u16>)>,
    probes: Vec<String>,
    /// Insertion order of the records.
    seed: u64,
    initial_capacity: u16,
    force_defaults: bool,
}

fuzz_target!(|input: Input| {
    let Input {
        records,
        probes,
        seed,
        initial_capacity,
        force_defaults,
    } = input;

    // Keys must be unique for lookups to be well defined.
    let expected = records
        .into_iter()
        .map(|(name, level, bonus)| (name, (level, bonus)))
        .collect::<BTreeMap<_, _>>();
    let mut order = expected.iter().collect::<Vec<_>>();
    order.shuffle(&mut SmallRng::seed_from_u64(seed));

    let mut builder = Builder::with_options(BuilderOptions {
        initial_capacity: usize::from(initial_capacity),
        force_defaults,
    });
    let mut tables = Vec::with_capacity(order.len());
    for (name, &(level, bonus)) in order {
        let name = builder.create_shared_string(name).unwrap();
        builder.start_table(3).unwrap();
        builder.add_field_offset(NAME, name).unwrap();
        builder.add_field::<i32>(LEVEL, level, 0).unwrap();
        builder.add_field_optional::<u16>(BONUS, bonus).unwrap();
        tables.push(builder.end_table().unwrap());
    }
    let vector = builder
        .create_sorted_vector_of_tables::<StrKey<NAME>>(&mut tables)
        .unwrap();
    builder.start_table(1).unwrap();
    builder.add_field_offset(4, vector).unwrap();
    let root = builder.end_table().unwrap();
    builder.finish(root, Some("FUZZ")).unwrap();

    let buf = builder.finished_data().unwrap();
    let root = root_as_table(buf).unwrap();
    let vtable = VTable::at(buf, vtable_position(buf, root.position()));
    assert_eq!(vtable.as_bytes(), root.vtable().as_bytes());
    let vector = root.get_vector::<ForwardTable>(4).unwrap();
    assert_eq!(vector.len(), expected.len());

    // Sorted order equals map order, field by field.
    for (table, (name, &(level, bonus))) in vector.iter().zip(&expected) {
        let name_pos = table.field_position(NAME).unwrap();
        assert_eq!(read_string_bytes(buf, follow_uoffset(buf, name_pos)), name.as_bytes());
        assert_eq!(table.get::<i32>(LEVEL, 0), level);
        assert_eq!(table.get_optional::<u16>(BONUS), bonus);
    }

    for probe in expected.keys().chain(&probes) {
        let found = vector.lookup_by_key::<StrKey<NAME>>(probe.as_bytes());
        assert_eq!(found.is_some(), expected.contains_key(probe));
        if let Some(table) = found {
            assert_eq!(&**table.get_bstr(NAME).unwrap(), probe.as_bytes());
        }
    }
});
