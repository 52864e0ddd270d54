//! Build a small monster buffer, then read it back without decoding.
#![allow(missing_docs)]

use flatframe::{
    Builder, BuilderOptions, ForwardStr, ForwardTable, StrKey, buffer_has_identifier,
    root_as_table,
};

const NAME: u16 = 4;
const HP: u16 = 6;
const MANA: u16 = 8;
const WEAPONS: u16 = 10;
const MINIONS: u16 = 12;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Builder::with_options(BuilderOptions {
        initial_capacity: 256,
        ..BuilderOptions::default()
    });

    let weapons = builder.create_vector_of_strings(&["Sword", "Axe"])?;
    let mut minions = Vec::new();
    for (name, hp) in [("Wilma", 30), ("Frodo", 50), ("Barney", 20)] {
        let name = builder.create_shared_string(name)?;
        builder.start_table(2)?;
        builder.add_field_offset(NAME, name)?;
        builder.add_field::<i16>(HP, hp, 100)?;
        minions.push(builder.end_table()?);
    }
    let minions = builder.create_sorted_vector_of_tables::<StrKey<NAME>>(&mut minions)?;

    let name = builder.create_shared_string("Orc")?;
    builder.start_table(5)?;
    builder.add_field_offset(NAME, name)?;
    builder.add_field::<i16>(HP, 300, 100)?;
    builder.add_field::<i16>(MANA, 150, 150)?;
    builder.add_field_offset(WEAPONS, weapons)?;
    builder.add_field_offset(MINIONS, minions)?;
    let root = builder.end_table()?;
    builder.finish(root, Some("MONS"))?;

    let buf = builder.into_finished()?;
    println!("{} bytes, identifier ok: {}", buf.len(), buffer_has_identifier(&buf, "MONS", false)?);

    let monster = root_as_table(&buf)?;
    println!("name:   {}", monster.get_str(NAME).unwrap_or_default());
    println!("hp:     {}", monster.get::<i16>(HP, 100));
    println!("mana:   {} (default, not stored)", monster.get::<i16>(MANA, 150));
    if let Some(weapons) = monster.get_vector::<ForwardStr>(WEAPONS) {
        for weapon in weapons {
            println!("weapon: {weapon}");
        }
    }
    if let Some(minions) = monster.get_vector::<ForwardTable>(MINIONS) {
        if let Some(frodo) = minions.lookup_by_key::<StrKey<NAME>>(b"Frodo") {
            println!("Frodo has {} hp", frodo.get::<i16>(HP, 100));
        }
    }
    Ok(())
}
