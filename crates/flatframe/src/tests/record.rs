//! A small schema used by the property tests: every field kind once.

use alloc::{
    boxed::Box,
    string::{String, ToString},
    vec::Vec,
};

use crate::{Builder, ForwardStr, ForwardTable, Offset, Table};

pub(crate) const NAME: u16 = 4;
pub(crate) const HP: u16 = 6;
pub(crate) const MANA: u16 = 8;
pub(crate) const SPEED: u16 = 10;
pub(crate) const FLAG: u16 = 12;
pub(crate) const INVENTORY: u16 = 14;
pub(crate) const TAGS: u16 = 16;
pub(crate) const FRIEND: u16 = 18;
const FIELDS: usize = 8;

pub(crate) const HP_DEFAULT: i16 = 100;

#[derive(Debug, Clone)]
pub(crate) struct Record {
    pub name: String,
    pub hp: i16,
    pub mana: Option<i32>,
    pub speed: f64,
    pub flag: bool,
    pub inventory: Vec<u8>,
    pub tags: Vec<String>,
    pub friend: Option<Box<Record>>,
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.speed.to_bits() == other.speed.to_bits()
            && self.name == other.name
            && self.hp == other.hp
            && self.mana == other.mana
            && self.flag == other.flag
            && self.inventory == other.inventory
            && self.tags == other.tags
            && self.friend == other.friend
    }
}

pub(crate) fn build_record(builder: &mut Builder, record: &Record) -> Offset<ForwardTable> {
    let friend = record
        .friend
        .as_ref()
        .map(|friend| build_record(builder, friend));
    let name = builder.create_string(&record.name).unwrap();
    let inventory = builder.create_vector(&record.inventory).unwrap();
    let tags = builder.create_vector_of_strings(&record.tags).unwrap();

    builder.start_table(FIELDS).unwrap();
    builder.add_field_offset(NAME, name).unwrap();
    builder.add_field::<i16>(HP, record.hp, HP_DEFAULT).unwrap();
    builder.add_field_optional::<i32>(MANA, record.mana).unwrap();
    builder.add_field::<f64>(SPEED, record.speed, 0.0).unwrap();
    builder.add_field::<bool>(FLAG, record.flag, false).unwrap();
    builder.add_field_offset(INVENTORY, inventory).unwrap();
    builder.add_field_offset(TAGS, tags).unwrap();
    if let Some(friend) = friend {
        builder.add_field_offset(FRIEND, friend).unwrap();
    }
    builder.end_table().unwrap()
}

pub(crate) fn read_record(table: Table<'_>) -> Record {
    Record {
        name: table.get_str(NAME).unwrap().into_owned(),
        hp: table.get(HP, HP_DEFAULT),
        mana: table.get_optional(MANA),
        speed: table.get(SPEED, 0.0),
        flag: table.get(FLAG, false),
        inventory: table.get_vector::<u8>(INVENTORY).unwrap().bytes().to_vec(),
        tags: table
            .get_vector::<ForwardStr>(TAGS)
            .unwrap()
            .iter()
            .map(|tag| tag.to_string())
            .collect(),
        friend: table
            .get_table(FRIEND)
            .map(|friend| Box::new(read_record(friend))),
    }
}
