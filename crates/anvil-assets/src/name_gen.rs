//! NPC name generation.
//!
//! Names are composed by walking a fixed per-race/gender sequence of rules
//! against the NAMECHNK.DAT fragment lists. The rules and their chance
//! thresholds are game-authored constants; changing them (or the draw
//! order) changes every generated name, so they are reproduced verbatim.

use crate::name_chunks::NameChunks;
use crate::{Error, Result};

/// A deterministic pseudo-random integer source.
///
/// The generator consumes a prefix of the source's sequence, so two calls
/// with identically seeded sources produce identical names. A source must
/// not be shared across concurrent generation calls.
pub trait RandomSource {
    /// Produce the next value in the sequence.
    fn next(&mut self) -> u32;
}

/// One name composition rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRule {
    /// Append a fragment drawn from the chunk list at this index.
    Index(usize),
    /// Append this text verbatim.
    Literal(&'static str),
    /// Like `Index`, but only if a percent gate passes.
    IndexWithChance { index: usize, chance: u32 },
    /// Like `IndexWithChance`, with the literal appended after the
    /// fragment on success.
    IndexLiteralWithChance {
        index: usize,
        literal: &'static str,
        chance: u32,
    },
}

use NameRule::{Index, IndexLiteralWithChance, IndexWithChance, Literal};

/// Rule sequences per (race, gender): entry `race * 2` is male, `+ 1`
/// female.
pub(crate) const NAME_RULES: [&[NameRule]; 48] = [
    // Race 0.
    &[Index(0), Index(1), Literal(" "), Index(4), Index(5)],
    &[Index(2), Index(3), Literal(" "), Index(4), Index(5)],
    // Race 1.
    &[Index(6), Index(7), Index(8), IndexWithChance { index: 9, chance: 75 }],
    &[
        Index(6),
        Index(7),
        Index(8),
        IndexWithChance { index: 9, chance: 75 },
        Index(10),
    ],
    // Race 2.
    &[
        Index(11),
        Index(12),
        Literal(" "),
        Index(15),
        Index(16),
        Literal("sen"),
    ],
    &[
        Index(13),
        Index(14),
        Literal(" "),
        Index(15),
        Index(16),
        Literal("sen"),
    ],
    // Race 3.
    &[Index(17), Index(18), Literal(" "), Index(21), Index(22)],
    &[Index(19), Index(20), Literal(" "), Index(21), Index(22)],
    // Race 4.
    &[Index(23), Index(24), Literal(" "), Index(27), Index(28)],
    &[Index(25), Index(26), Literal(" "), Index(27), Index(28)],
    // Race 5.
    &[Index(29), Index(30), Literal(" "), Index(33), Index(34)],
    &[Index(31), Index(32), Literal(" "), Index(33), Index(34)],
    // Race 6.
    &[Index(35), Index(36), Literal(" "), Index(39), Index(40)],
    &[Index(37), Index(38), Literal(" "), Index(39), Index(40)],
    // Race 7.
    &[Index(41), Index(42), Literal(" "), Index(45), Index(46)],
    &[Index(43), Index(44), Literal(" "), Index(45), Index(46)],
    // Race 8.
    &[Index(47), IndexWithChance { index: 48, chance: 75 }, Index(49)],
    &[Index(47), IndexWithChance { index: 48, chance: 75 }, Index(49)],
    // Race 9.
    &[Index(47), IndexWithChance { index: 48, chance: 75 }, Index(49)],
    &[Index(47), IndexWithChance { index: 48, chance: 75 }, Index(49)],
    // Race 10.
    &[Index(47), IndexWithChance { index: 48, chance: 75 }, Index(49)],
    &[Index(47), IndexWithChance { index: 48, chance: 75 }, Index(49)],
    // Race 11.
    &[Index(47), IndexWithChance { index: 48, chance: 75 }, Index(49)],
    &[Index(47), IndexWithChance { index: 48, chance: 75 }, Index(49)],
    // Race 12.
    &[Index(47), IndexWithChance { index: 48, chance: 75 }, Index(49)],
    &[Index(47), IndexWithChance { index: 48, chance: 75 }, Index(49)],
    // Race 13.
    &[Index(47), IndexWithChance { index: 48, chance: 75 }, Index(49)],
    &[Index(47), IndexWithChance { index: 48, chance: 75 }, Index(49)],
    // Race 14.
    &[Index(47), IndexWithChance { index: 48, chance: 75 }, Index(49)],
    &[Index(47), IndexWithChance { index: 48, chance: 75 }, Index(49)],
    // Race 15.
    &[Index(47), IndexWithChance { index: 48, chance: 75 }, Index(49)],
    &[Index(47), IndexWithChance { index: 48, chance: 75 }, Index(49)],
    // Race 16.
    &[Index(47), IndexWithChance { index: 48, chance: 75 }, Index(49)],
    &[Index(47), IndexWithChance { index: 48, chance: 75 }, Index(49)],
    // Race 17.
    &[Index(50), IndexWithChance { index: 51, chance: 75 }, Index(52)],
    &[Index(50), IndexWithChance { index: 51, chance: 75 }, Index(52)],
    // Race 18.
    &[Index(50), IndexWithChance { index: 51, chance: 75 }, Index(52)],
    &[Index(50), IndexWithChance { index: 51, chance: 75 }, Index(52)],
    // Race 19.
    &[Index(50), IndexWithChance { index: 51, chance: 75 }, Index(52)],
    &[Index(50), IndexWithChance { index: 51, chance: 75 }, Index(52)],
    // Race 20.
    &[Index(50), IndexWithChance { index: 51, chance: 75 }, Index(52)],
    &[Index(50), IndexWithChance { index: 51, chance: 75 }, Index(52)],
    // Race 21.
    &[Index(50), Index(52), Index(53)],
    &[Index(50), Index(52), Index(53)],
    // Race 22.
    &[
        IndexLiteralWithChance {
            index: 54,
            literal: " ",
            chance: 25,
        },
        Index(55),
        Index(56),
        Index(57),
    ],
    &[
        IndexLiteralWithChance {
            index: 54,
            literal: " ",
            chance: 25,
        },
        Index(55),
        Index(56),
        Index(57),
    ],
    // Race 23.
    &[Index(55), Index(56), Index(57)],
    &[Index(55), Index(56), Index(57)],
];

/// Highest chunk index any rule references; the chunk table must extend
/// past it for every rule sequence to be usable.
pub(crate) fn max_rule_chunk_index() -> usize {
    NAME_RULES
        .iter()
        .flat_map(|rules| rules.iter())
        .filter_map(|rule| match *rule {
            Index(index)
            | IndexWithChance { index, .. }
            | IndexLiteralWithChance { index, .. } => Some(index),
            Literal(_) => None,
        })
        .max()
        .unwrap_or(0)
}

/// Generate a name for a race/gender pair, consuming draws from `random`.
///
/// The draw order is part of the output contract: plain index rules take
/// one draw; chance rules take one gate draw and, only when the gate
/// passes (`gate % 100 <= chance`), one selection draw.
pub fn generate_name<R>(
    chunks: &NameChunks,
    race_id: usize,
    is_male: bool,
    random: &mut R,
) -> Result<String>
where
    R: RandomSource + ?Sized,
{
    let sequence = race_id * 2 + usize::from(!is_male);
    let rules = NAME_RULES
        .get(sequence)
        .ok_or(Error::UnrecognizedRule {
            race: race_id,
            male: is_male,
        })?;

    apply_rules(chunks, rules, random)
}

/// Fold a rule sequence left to right into a name.
fn apply_rules<R>(chunks: &NameChunks, rules: &[NameRule], random: &mut R) -> Result<String>
where
    R: RandomSource + ?Sized,
{
    let mut name = String::new();
    for rule in rules {
        match *rule {
            Index(index) => {
                let fragment = draw_fragment(chunks.list(index)?, random)?;
                name.push_str(fragment);
            }
            Literal(text) => name.push_str(text),
            IndexWithChance { index, chance } => {
                let list = chunks.list(index)?;
                if random.next() % 100 <= chance {
                    name.push_str(draw_fragment(list, random)?);
                }
            }
            IndexLiteralWithChance {
                index,
                literal,
                chance,
            } => {
                let list = chunks.list(index)?;
                if random.next() % 100 <= chance {
                    name.push_str(draw_fragment(list, random)?);
                    name.push_str(literal);
                }
            }
        }
    }

    Ok(name)
}

fn draw_fragment<'a, R>(list: &'a [String], random: &mut R) -> Result<&'a str>
where
    R: RandomSource + ?Sized,
{
    if list.is_empty() {
        return Err(Error::malformed("NAMECHNK.DAT", "empty chunk list"));
    }

    Ok(&list[random.next() as usize % list.len()])
}
