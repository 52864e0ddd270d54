#![allow(missing_docs, dead_code)]

//! Hand-written accessors for a small game schema, shaped the way generated
//! code would use the runtime.

use std::borrow::Cow;

use flatframe::{
    BuildError, Builder, ForwardStr, ForwardTable, ForwardVector, InlineStruct, Offset, StrKey,
    Struct, Table, UnionShape, Vector, root_as_table,
};

pub const MONSTER_IDENTIFIER: &str = "MONS";

pub mod monster {
    pub const POS: u16 = 4;
    pub const MANA: u16 = 6;
    pub const HP: u16 = 8;
    pub const NAME: u16 = 10;
    pub const INVENTORY: u16 = 14;
    pub const COLOR: u16 = 16;
    pub const TEST_TYPE: u16 = 18;
    pub const TEST: u16 = 20;
    pub const TEST4: u16 = 22;
    pub const TESTARRAYOFSTRING: u16 = 24;
    pub const TESTARRAYOFTABLES: u16 = 26;
    pub const ENEMY: u16 = 28;
    pub const TESTNESTEDFLATBUFFER: u16 = 30;
    pub const TESTBOOL: u16 = 34;
    pub const FIELDS: usize = 16;

    pub const MANA_DEFAULT: i16 = 150;
    pub const HP_DEFAULT: i16 = 100;
    pub const COLOR_BLUE: u8 = 8;
    pub const COLOR_GREEN: u8 = 2;
}

pub type MonsterKey = StrKey<{ monster::NAME }>;

#[derive(Debug, Clone, Copy)]
pub struct Monster<'a>(pub Table<'a>);

impl<'a> Monster<'a> {
    pub fn root(buf: &'a [u8]) -> Self {
        Self(root_as_table(buf).unwrap())
    }

    pub fn pos(&self) -> Option<Vec3<'a>> {
        self.0.get_struct(monster::POS).map(Vec3)
    }

    pub fn mana(&self) -> i16 {
        self.0.get(monster::MANA, monster::MANA_DEFAULT)
    }

    pub fn hp(&self) -> i16 {
        self.0.get(monster::HP, monster::HP_DEFAULT)
    }

    pub fn name(&self) -> Cow<'a, str> {
        self.0.get_str(monster::NAME).unwrap_or_default()
    }

    pub fn inventory(&self) -> Option<Vector<'a, u8>> {
        self.0.get_vector(monster::INVENTORY)
    }

    pub fn color(&self) -> u8 {
        self.0.get(monster::COLOR, monster::COLOR_BLUE)
    }

    pub fn test_type(&self) -> u8 {
        self.0.get(monster::TEST_TYPE, 0)
    }

    pub fn test(&self) -> Option<Any<'a>> {
        self.0.get_union(monster::TEST_TYPE, monster::TEST)
    }

    pub fn test4(&self) -> Option<Vector<'a, InlineStruct<4>>> {
        self.0.get_vector(monster::TEST4)
    }

    pub fn testarrayofstring(&self) -> Option<Vector<'a, ForwardStr>> {
        self.0.get_vector(monster::TESTARRAYOFSTRING)
    }

    pub fn testarrayoftables(&self) -> Option<Vector<'a, ForwardTable>> {
        self.0.get_vector(monster::TESTARRAYOFTABLES)
    }

    pub fn testarrayoftables_by_key(&self, name: &str) -> Option<Monster<'a>> {
        self.testarrayoftables()?
            .lookup_by_key::<MonsterKey>(name.as_bytes())
            .map(Monster)
    }

    pub fn enemy(&self) -> Option<Monster<'a>> {
        self.0.get_table(monster::ENEMY).map(Monster)
    }

    pub fn testnestedflatbuffer(&self) -> Option<Monster<'a>> {
        self.0
            .get_nested_root(monster::TESTNESTEDFLATBUFFER)
            .unwrap()
            .map(Monster)
    }

    pub fn testbool(&self) -> bool {
        self.0.get(monster::TESTBOOL, false)
    }
}

/// `union Any { Monster, TestSimpleTableWithEnum }`
#[derive(Debug)]
pub enum Any<'a> {
    Monster(Monster<'a>),
    TestSimpleTableWithEnum(Table<'a>),
    Unknown(u8, Table<'a>),
}

impl Any<'_> {
    pub const MONSTER: u8 = 1;
    pub const TEST_SIMPLE_TABLE_WITH_ENUM: u8 = 2;
}

impl<'a> UnionShape<'a> for Any<'a> {
    fn from_tag(tag: u8, table: Table<'a>) -> Self {
        match tag {
            Any::MONSTER => Self::Monster(Monster(table)),
            Any::TEST_SIMPLE_TABLE_WITH_ENUM => Self::TestSimpleTableWithEnum(table),
            other => Self::Unknown(other, table),
        }
    }
}

/// `struct Vec3 { x, y, z: float; test1: double; test2: Color; test3: Test }`,
/// 32 bytes aligned to 8.
#[derive(Debug, Clone, Copy)]
pub struct Vec3<'a>(pub Struct<'a>);

impl<'a> Vec3<'a> {
    pub fn x(&self) -> f32 {
        self.0.get(0)
    }

    pub fn y(&self) -> f32 {
        self.0.get(4)
    }

    pub fn z(&self) -> f32 {
        self.0.get(8)
    }

    pub fn test1(&self) -> f64 {
        self.0.get(16)
    }

    pub fn test2(&self) -> u8 {
        self.0.get(24)
    }

    pub fn test3(&self) -> Test<'a> {
        Test(self.0.get_struct(26))
    }
}

/// `struct Test { a: short; b: byte }`, 4 bytes aligned to 2.
#[derive(Debug, Clone, Copy)]
pub struct Test<'a>(pub Struct<'a>);

impl Test<'_> {
    pub fn a(&self) -> i16 {
        self.0.get(0)
    }

    pub fn b(&self) -> i8 {
        self.0.get(2)
    }
}

pub enum Vec3Tag {}

#[allow(clippy::too_many_arguments)]
pub fn create_vec3(
    builder: &mut Builder,
    x: f32,
    y: f32,
    z: f32,
    test1: f64,
    test2: u8,
    a: i16,
    b: i8,
) -> Result<Offset<Vec3Tag>, BuildError> {
    builder.prep(8, 32)?;
    builder.pad(2);
    builder.prep(2, 4)?;
    builder.pad(1);
    builder.put(b);
    builder.put(a);
    builder.pad(1);
    builder.put(test2);
    builder.put(test1);
    builder.pad(4);
    builder.put(z);
    builder.put(y);
    builder.put(x);
    Ok(Offset::new(builder.offset()))
}

pub fn create_test(builder: &mut Builder, a: i16, b: i8) -> Result<(), BuildError> {
    builder.prep(2, 4)?;
    builder.pad(1);
    builder.put(b);
    builder.put(a);
    Ok(())
}

/// A monster with only a name, the common element of table vectors.
pub fn create_named_monster(
    builder: &mut Builder,
    name: Offset<ForwardStr>,
) -> Result<Offset<ForwardTable>, BuildError> {
    builder.start_table(monster::FIELDS)?;
    builder.add_field_offset(monster::NAME, name)?;
    let monster = builder.end_table()?;
    builder.required(monster, monster::NAME)?;
    Ok(monster)
}

pub mod movie {
    pub const MAIN_CHARACTER_TYPE: u16 = 4;
    pub const MAIN_CHARACTER: u16 = 6;
    pub const CHARACTERS_TYPE: u16 = 8;
    pub const CHARACTERS: u16 = 10;
    pub const FIELDS: usize = 4;

    pub const MU_LAN: u8 = 1;
    pub const RAPUNZEL: u8 = 2;

    /// `table Attacker { sword_attack_damage: int }`
    pub const SWORD_ATTACK_DAMAGE: u16 = 4;
}

/// `union Character { MuLan: Attacker, Rapunzel }`
#[derive(Debug)]
pub enum Character<'a> {
    MuLan(Table<'a>),
    Rapunzel(Table<'a>),
    Unknown(u8),
}

impl<'a> UnionShape<'a> for Character<'a> {
    fn from_tag(tag: u8, table: Table<'a>) -> Self {
        match tag {
            movie::MU_LAN => Self::MuLan(table),
            movie::RAPUNZEL => Self::Rapunzel(table),
            other => Self::Unknown(other),
        }
    }
}

pub type StringVector = Offset<ForwardVector<ForwardStr>>;
