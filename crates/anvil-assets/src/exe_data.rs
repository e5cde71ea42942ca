//! Per-class side data sourced from the game executable.
//!
//! CLASSES.DAT only carries bit-flag records and answer triples; everything
//! else about a class (its name, equipment permissions, progression numbers)
//! lives in tables inside the game executable. Extracting those tables is a
//! collaborator's job - this crate consumes them as an [`ExeClassData`]
//! value during class synthesis.
//!
//! With the `serde` feature enabled the table can be (de)serialized, which
//! is how the CLI loads it from a JSON file.

/// Per-class tables from the game executable, indexed by class ordinal.
///
/// Every `Vec` keyed by ordinal must hold one entry per character class
/// (see [`crate::classes::CLASS_COUNT`]); class synthesis rejects short
/// tables.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExeClassData {
    /// Display name per class.
    pub class_names: Vec<String>,
    /// Preferred-attribute blurb per class.
    pub preferred_attributes: Vec<String>,
    /// Allowed-armor code per class (0 through 3, best to none).
    pub allowed_armors: Vec<u8>,
    /// Index into `allowed_shield_lists` per class; -1 allows every shield.
    pub allowed_shield_indices: Vec<i8>,
    /// Shield id lists referenced by `allowed_shield_indices`.
    pub allowed_shield_lists: Vec<Vec<u8>>,
    /// Index into `allowed_weapon_lists` per class; -1 allows every weapon.
    pub allowed_weapon_indices: Vec<i8>,
    /// Weapon id lists referenced by `allowed_weapon_indices`.
    pub allowed_weapon_lists: Vec<Vec<u8>>,
    /// Packed class-number byte per class (same bit layout as CLASSES.DAT).
    pub class_numbers_to_ids: Vec<u8>,
    /// Initial experience cap per class.
    pub initial_experience_caps: Vec<i32>,
    /// Health die per class.
    pub health_dice: Vec<u8>,
    /// Lockpicking divisor per class.
    pub lockpicking_divisors: Vec<u8>,
}
