//! Decoders for The Elder Scrolls: Arena's game-data files.
//!
//! The game ships its data as a mix of fixed-layout binary structs,
//! length-prefixed chunk tables, ad-hoc `#`-delimited text files, and
//! bit-packed image masks. This crate decodes all of them into typed,
//! immutable tables and implements the NPC name generator that composes
//! names from the decoded fragment lists.
//!
//! # Quick Start
//!
//! ```no_run
//! use anvil_assets::{AssetTable, ExeClassData, RandomSource};
//! use anvil_vfs::DirectoryVfs;
//!
//! struct Lcg(u32);
//!
//! impl RandomSource for Lcg {
//!     fn next(&mut self) -> u32 {
//!         self.0 = self.0.wrapping_mul(1103515245).wrapping_add(12345);
//!         self.0 >> 16
//!     }
//! }
//!
//! let vfs = DirectoryVfs::new("path/to/ARENA");
//! let exe_data = ExeClassData::default();
//! let assets = AssetTable::load(&vfs, &exe_data)?;
//!
//! println!("{}", assets.template_text().get("1400")?);
//! for class in assets.class_definitions() {
//!     println!("{} ({})", class.name(), class.category().name());
//! }
//!
//! let mut random = Lcg(12345);
//! println!("{}", assets.generate_name(0, true, &mut random)?);
//! # Ok::<(), anvil_assets::Error>(())
//! ```
//!
//! # Lifecycle
//!
//! [`AssetTable::load`] decodes every table synchronously; any failure
//! aborts the load and no partial table is exposed. The returned table is
//! immutable and safe for concurrent reads. The [`RandomSource`] consumed
//! by name generation is sequential mutable state owned by the caller.

mod classes;
mod dungeons;
mod error;
mod exe_data;
mod flavor;
mod name_chunks;
mod name_gen;
mod questions;
mod spells;
mod table;
mod template;
mod text;
mod world_map;

pub use classes::{
    ArmorMaterial, ChoiceTriple, ClassCategory, ClassDefinition, ClassFlags, ClassGeneration,
    ShieldKind, CHOICE_COUNT, CLASS_COUNT, WEAPON_ID_COUNT,
};
pub use dungeons::{parse_dungeons, DungeonEntry};
pub use error::{Error, Result};
pub use exe_data::ExeClassData;
pub use flavor::{
    decode_artifact_text, decode_trade_functions, ArtifactTavernText, TradeFunctions, TradeText,
    ARTIFACT_BLOCK_COUNT, TRADE_FUNCTION_COUNT, TRADE_PERSONALITY_COUNT, TRADE_VARIANT_COUNT,
};
pub use name_chunks::NameChunks;
pub use name_gen::{generate_name, NameRule, RandomSource};
pub use questions::{parse_questions, QuestionChoice, QuestionRecord};
pub use spells::{
    decode_spells, parse_maker_descriptions, SpellRecord, SPELL_COUNT, SPELL_MAKER_SLOT_COUNT,
    SPELL_NAME_LEN, SPELL_PARAM_COUNT, SPELL_RECORD_SIZE,
};
pub use table::AssetTable;
pub use template::TemplateText;
pub use world_map::{
    decode_world_map_masks, Climate, Rect, WorldMapMask, WorldMapTerrain, MASK_BASE_OFFSET,
    MASK_COUNT, MASK_RECTS, TERRAIN_HEIGHT, TERRAIN_WIDTH,
};
