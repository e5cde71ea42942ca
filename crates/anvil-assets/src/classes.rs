//! Character classes (CLASSES.DAT plus executable side data).
//!
//! CLASSES.DAT has two sections: one packed flag byte per class, then the
//! answer-count triples that the character-creation questionnaire maps onto
//! a class. Full [`ClassDefinition`]s are synthesized by joining that data
//! with the per-class tables from the executable ([`ExeClassData`]).

use anvil_common::BinaryReader;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::exe_data::ExeClassData;
use crate::{Error, Result};

/// Number of character classes.
pub const CLASS_COUNT: usize = 18;

/// Number of answer-count triples in CLASSES.DAT.
pub const CHOICE_COUNT: usize = 66;

/// Number of weapon ids in the game (staff through long bow).
pub const WEAPON_ID_COUNT: usize = 18;

// Bit layout of a packed class byte.
const ID_MASK: u8 = 0x1F;
const SPELLCASTER_MASK: u8 = 0x20;
const CRITICAL_HIT_MASK: u8 = 0x40;
const THIEF_MASK: u8 = 0x80;

// Shields share an id space with armor pieces; shield ids start at 7.
const SHIELD_ID_BASE: u8 = 7;

/// The three class archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassCategory {
    Mage,
    Thief,
    Warrior,
}

impl ClassCategory {
    /// Get the category's display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Mage => "Mage",
            Self::Thief => "Thief",
            Self::Warrior => "Warrior",
        }
    }

    /// Derive the category from a class ordinal: the first third of the
    /// class list is mages, the second thieves, the last warriors.
    pub fn from_ordinal(ordinal: usize) -> Self {
        if ordinal < CLASS_COUNT / 3 {
            Self::Mage
        } else if ordinal < 2 * CLASS_COUNT / 3 {
            Self::Thief
        } else {
            Self::Warrior
        }
    }
}

/// Armor materials a class may wear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmorMaterial {
    Leather,
    Chain,
    Plate,
}

/// Shield kinds a class may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShieldKind {
    Buckler,
    Round,
    Kite,
    Tower,
}

const SHIELD_KINDS: [ShieldKind; 4] = [
    ShieldKind::Buckler,
    ShieldKind::Round,
    ShieldKind::Kite,
    ShieldKind::Tower,
];

/// Flags unpacked from one CLASSES.DAT class byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassFlags {
    pub id: u8,
    pub is_spellcaster: bool,
    pub has_critical_hit: bool,
    pub is_thief: bool,
}

impl ClassFlags {
    /// Unpack a class byte.
    pub fn from_packed(value: u8) -> Self {
        Self {
            id: value & ID_MASK,
            is_spellcaster: (value & SPELLCASTER_MASK) != 0,
            has_critical_hit: (value & CRITICAL_HIT_MASK) != 0,
            is_thief: (value & THIEF_MASK) != 0,
        }
    }
}

/// One answer-count triple from the questionnaire lookup section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct ChoiceTriple {
    pub a: u8,
    pub b: u8,
    pub c: u8,
}

/// The decoded CLASSES.DAT tables.
#[derive(Debug, Clone)]
pub struct ClassGeneration {
    classes: [ClassFlags; CLASS_COUNT],
    choices: [ChoiceTriple; CHOICE_COUNT],
}

impl ClassGeneration {
    /// Decode CLASSES.DAT: `CLASS_COUNT` packed flag bytes followed by
    /// `CHOICE_COUNT` three-byte answer triples.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);

        let mut classes = [ClassFlags::default(); CLASS_COUNT];
        for flags in &mut classes {
            *flags = ClassFlags::from_packed(reader.read_u8()?);
        }

        let mut choices = [ChoiceTriple { a: 0, b: 0, c: 0 }; CHOICE_COUNT];
        for choice in &mut choices {
            *choice = reader.read_struct::<ChoiceTriple>()?;
        }

        Ok(Self { classes, choices })
    }

    /// Get the per-class flag records.
    pub fn classes(&self) -> &[ClassFlags; CLASS_COUNT] {
        &self.classes
    }

    /// Get the answer-count triples.
    pub fn choices(&self) -> &[ChoiceTriple; CHOICE_COUNT] {
        &self.choices
    }

    /// Find the choice slot matching an (a, b, c) answer-count triple.
    pub fn choice_index(&self, a: u8, b: u8, c: u8) -> Option<usize> {
        self.choices
            .iter()
            .position(|choice| choice.a == a && choice.b == b && choice.c == c)
    }
}

/// A fully synthesized character class.
#[derive(Debug, Clone)]
pub struct ClassDefinition {
    name: String,
    preferred_attributes: String,
    allowed_armors: Vec<ArmorMaterial>,
    allowed_shields: Vec<ShieldKind>,
    allowed_weapons: Vec<u8>,
    category: ClassCategory,
    lockpicking: f64,
    health_die: u8,
    initial_experience_cap: i32,
    class_id: u8,
    is_mage: bool,
    is_thief: bool,
    has_critical_hit: bool,
}

impl ClassDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn preferred_attributes(&self) -> &str {
        &self.preferred_attributes
    }

    pub fn allowed_armors(&self) -> &[ArmorMaterial] {
        &self.allowed_armors
    }

    pub fn allowed_shields(&self) -> &[ShieldKind] {
        &self.allowed_shields
    }

    /// Get the allowed weapon ids (0 through 17).
    pub fn allowed_weapons(&self) -> &[u8] {
        &self.allowed_weapons
    }

    pub fn category(&self) -> ClassCategory {
        self.category
    }

    /// Get the lockpicking skill multiplier.
    pub fn lockpicking(&self) -> f64 {
        self.lockpicking
    }

    pub fn health_die(&self) -> u8 {
        self.health_die
    }

    pub fn initial_experience_cap(&self) -> i32 {
        self.initial_experience_cap
    }

    pub fn class_id(&self) -> u8 {
        self.class_id
    }

    pub fn is_mage(&self) -> bool {
        self.is_mage
    }

    pub fn is_thief(&self) -> bool {
        self.is_thief
    }

    pub fn has_critical_hit(&self) -> bool {
        self.has_critical_hit
    }
}

/// Synthesize the full class list from the executable side tables.
pub fn synthesize_classes(exe: &ExeClassData) -> Result<Vec<ClassDefinition>> {
    let mut definitions = Vec::with_capacity(CLASS_COUNT);

    for ordinal in 0..CLASS_COUNT {
        let name = class_entry(&exe.class_names, ordinal)?.clone();
        let preferred_attributes = class_entry(&exe.preferred_attributes, ordinal)?.clone();

        let allowed_armors = allowed_armors(*class_entry(&exe.allowed_armors, ordinal)?)?;
        let allowed_shields = allowed_shields(
            *class_entry(&exe.allowed_shield_indices, ordinal)?,
            &exe.allowed_shield_lists,
        )?;
        let allowed_weapons = allowed_weapons(
            *class_entry(&exe.allowed_weapon_indices, ordinal)?,
            &exe.allowed_weapon_lists,
        )?;

        let divisor = *class_entry(&exe.lockpicking_divisors, ordinal)?;
        if divisor == 0 {
            return Err(Error::malformed(
                "executable class data",
                format!("lockpicking divisor for class {ordinal} is zero"),
            ));
        }
        let lockpicking = f64::from(200 / u32::from(divisor)) / 100.0;

        let packed = ClassFlags::from_packed(*class_entry(&exe.class_numbers_to_ids, ordinal)?);

        definitions.push(ClassDefinition {
            name,
            preferred_attributes,
            allowed_armors,
            allowed_shields,
            allowed_weapons,
            category: ClassCategory::from_ordinal(ordinal),
            lockpicking,
            health_die: *class_entry(&exe.health_dice, ordinal)?,
            initial_experience_cap: *class_entry(&exe.initial_experience_caps, ordinal)?,
            class_id: packed.id,
            is_mage: packed.is_spellcaster,
            is_thief: packed.is_thief,
            has_critical_hit: packed.has_critical_hit,
        });
    }

    Ok(definitions)
}

fn class_entry<T>(table: &[T], ordinal: usize) -> Result<&T> {
    table.get(ordinal).ok_or_else(|| {
        Error::malformed(
            "executable class data",
            format!("side table holds {} entries, need {}", table.len(), CLASS_COUNT),
        )
    })
}

/// Resolve an allowed-armor code: 0 is every material, 3 is none, and the
/// codes between peel materials off the heavy end.
fn allowed_armors(code: u8) -> Result<Vec<ArmorMaterial>> {
    match code {
        0 => Ok(vec![
            ArmorMaterial::Leather,
            ArmorMaterial::Chain,
            ArmorMaterial::Plate,
        ]),
        1 => Ok(vec![ArmorMaterial::Leather, ArmorMaterial::Chain]),
        2 => Ok(vec![ArmorMaterial::Leather]),
        3 => Ok(Vec::new()),
        other => Err(Error::malformed(
            "executable class data",
            format!("bad allowed-armor code {other}"),
        )),
    }
}

/// Resolve an allowed-shield list. Index -1 allows every shield kind;
/// otherwise the index selects a list of shield ids (offset by
/// `SHIELD_ID_BASE` into the shared armor/shield id space).
fn allowed_shields(index: i8, lists: &[Vec<u8>]) -> Result<Vec<ShieldKind>> {
    if index == -1 {
        return Ok(SHIELD_KINDS.to_vec());
    }

    let list = lists.get(index as usize).ok_or(Error::IndexOutOfRange {
        index: index as usize,
        limit: lists.len(),
    })?;

    list.iter()
        .map(|&id| {
            id.checked_sub(SHIELD_ID_BASE)
                .and_then(|slot| SHIELD_KINDS.get(slot as usize).copied())
                .ok_or(Error::IndexOutOfRange {
                    index: id as usize,
                    limit: SHIELD_ID_BASE as usize + SHIELD_KINDS.len(),
                })
        })
        .collect()
}

/// Resolve an allowed-weapon list. Index -1 allows every weapon id.
fn allowed_weapons(index: i8, lists: &[Vec<u8>]) -> Result<Vec<u8>> {
    if index == -1 {
        return Ok((0..WEAPON_ID_COUNT as u8).collect());
    }

    let list = lists.get(index as usize).ok_or(Error::IndexOutOfRange {
        index: index as usize,
        limit: lists.len(),
    })?;

    list.iter()
        .map(|&id| {
            if (id as usize) < WEAPON_ID_COUNT {
                Ok(id)
            } else {
                Err(Error::IndexOutOfRange {
                    index: id as usize,
                    limit: WEAPON_ID_COUNT,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_exe_data() -> ExeClassData {
        ExeClassData {
            class_names: (0..CLASS_COUNT).map(|i| format!("Class {i}")).collect(),
            preferred_attributes: (0..CLASS_COUNT).map(|_| "INT".to_string()).collect(),
            allowed_armors: vec![0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2, 3, 0, 1],
            allowed_shield_indices: vec![-1, 0, 1, -1, 0, 1, -1, 0, 1, -1, 0, 1, -1, 0, 1, -1, 0, 1],
            allowed_shield_lists: vec![vec![7, 8], vec![10]],
            allowed_weapon_indices: vec![-1, 0, -1, 0, -1, 0, -1, 0, -1, 0, -1, 0, -1, 0, -1, 0, -1, 0],
            allowed_weapon_lists: vec![vec![0, 5, 17]],
            class_numbers_to_ids: (0..CLASS_COUNT as u8).map(|i| i | 0x20).collect(),
            initial_experience_caps: vec![1000; CLASS_COUNT],
            health_dice: vec![6; CLASS_COUNT],
            lockpicking_divisors: vec![3; CLASS_COUNT],
        }
    }

    #[test]
    fn test_class_flags_unpack() {
        let flags = ClassFlags::from_packed(0xE5);
        assert_eq!(flags.id, 0x05);
        assert!(flags.is_spellcaster);
        assert!(flags.has_critical_hit);
        assert!(flags.is_thief);

        let flags = ClassFlags::from_packed(0x1F);
        assert_eq!(flags.id, 0x1F);
        assert!(!flags.is_spellcaster);
        assert!(!flags.has_critical_hit);
        assert!(!flags.is_thief);
    }

    #[test]
    fn test_decode_sections() {
        let mut data = Vec::new();
        data.extend((0..CLASS_COUNT as u8).map(|i| i | 0x40));
        for i in 0..CHOICE_COUNT as u8 {
            data.extend([i, i.wrapping_add(1), i.wrapping_add(2)]);
        }

        let table = ClassGeneration::decode(&data).unwrap();
        assert_eq!(table.classes()[3].id, 3);
        assert!(table.classes()[3].has_critical_hit);
        assert_eq!(table.choices()[65].a, 65);
        assert_eq!(table.choice_index(10, 11, 12), Some(10));
        assert_eq!(table.choice_index(200, 0, 0), None);
    }

    #[test]
    fn test_decode_short_buffer_fails() {
        let data = vec![0u8; CLASS_COUNT + 10];
        assert!(ClassGeneration::decode(&data).is_err());
    }

    #[test]
    fn test_category_by_ordinal_thirds() {
        assert_eq!(ClassCategory::from_ordinal(0), ClassCategory::Mage);
        assert_eq!(ClassCategory::from_ordinal(5), ClassCategory::Mage);
        assert_eq!(ClassCategory::from_ordinal(6), ClassCategory::Thief);
        assert_eq!(ClassCategory::from_ordinal(11), ClassCategory::Thief);
        assert_eq!(ClassCategory::from_ordinal(12), ClassCategory::Warrior);
        assert_eq!(ClassCategory::from_ordinal(17), ClassCategory::Warrior);
    }

    #[test]
    fn test_allowed_armor_codes() {
        assert_eq!(allowed_armors(0).unwrap().len(), 3);
        assert_eq!(allowed_armors(1).unwrap().len(), 2);
        assert_eq!(
            allowed_armors(2).unwrap(),
            vec![ArmorMaterial::Leather]
        );
        assert!(allowed_armors(3).unwrap().is_empty());
        assert!(allowed_armors(4).is_err());
    }

    #[test]
    fn test_shield_sentinel_allows_all() {
        let shields = allowed_shields(-1, &[]).unwrap();
        assert_eq!(shields, SHIELD_KINDS);
    }

    #[test]
    fn test_shield_ids_resolve_through_base_offset() {
        let shields = allowed_shields(0, &[vec![7, 10]]).unwrap();
        assert_eq!(shields, vec![ShieldKind::Buckler, ShieldKind::Tower]);

        assert!(allowed_shields(0, &[vec![6]]).is_err());
        assert!(allowed_shields(0, &[vec![11]]).is_err());
    }

    #[test]
    fn test_synthesize_joins_side_tables() {
        let definitions = synthesize_classes(&sample_exe_data()).unwrap();
        assert_eq!(definitions.len(), CLASS_COUNT);

        let first = &definitions[0];
        assert_eq!(first.name(), "Class 0");
        assert_eq!(first.category(), ClassCategory::Mage);
        assert_eq!(first.allowed_armors().len(), 3);
        assert_eq!(first.allowed_shields().len(), 4);
        assert_eq!(first.allowed_weapons().len(), WEAPON_ID_COUNT);
        // floor(200 / 3) / 100
        assert_eq!(first.lockpicking(), 0.66);
        assert!(first.is_mage());
        assert!(!first.is_thief());

        let second = &definitions[1];
        assert_eq!(second.allowed_weapons(), &[0, 5, 17]);
        assert_eq!(
            second.allowed_shields(),
            &[ShieldKind::Buckler, ShieldKind::Round]
        );
    }

    #[test]
    fn test_synthesize_rejects_short_side_table() {
        let mut exe = sample_exe_data();
        exe.health_dice.truncate(4);

        assert!(matches!(
            synthesize_classes(&exe),
            Err(Error::MalformedRecord { .. })
        ));
    }
}
