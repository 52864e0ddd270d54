use alloc::{boxed::Box, string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen};

use super::record::Record;

impl Arbitrary for Record {
    fn arbitrary(g: &mut Gen) -> Self {
        fn gen_record(g: &mut Gen, depth: usize) -> Record {
            let friend = if depth > 0 && bool::arbitrary(g) {
                Some(Box::new(gen_record(g, depth - 1)))
            } else {
                None
            };
            Record {
                name: String::arbitrary(g),
                hp: i16::arbitrary(g),
                mana: Option::<i32>::arbitrary(g),
                speed: f64::arbitrary(g),
                flag: bool::arbitrary(g),
                inventory: Vec::<u8>::arbitrary(g),
                tags: Vec::<String>::arbitrary(g),
                friend,
            }
        }

        let depth = usize::arbitrary(g) % 3;
        gen_record(g, depth)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let mut smaller = Vec::new();
        if let Some(friend) = &self.friend {
            smaller.push((**friend).clone());
            smaller.push(Record {
                friend: None,
                ..self.clone()
            });
        }
        if !self.tags.is_empty() {
            smaller.push(Record {
                tags: Vec::new(),
                ..self.clone()
            });
        }
        if !self.inventory.is_empty() {
            smaller.push(Record {
                inventory: Vec::new(),
                ..self.clone()
            });
        }
        Box::new(smaller.into_iter())
    }
}
