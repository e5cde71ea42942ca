//! The asset table: every decoded game-data table behind one immutable
//! value.
//!
//! [`AssetTable::load`] runs the decode steps synchronously in a fixed
//! order. Any failure aborts the whole load; a partially decoded table is
//! never returned. Once built the table is read-only and safe to share
//! across threads.

use anvil_vfs::Vfs;
use tracing::debug;

use crate::classes::{self, ClassDefinition, ClassGeneration};
use crate::dungeons::{self, DungeonEntry};
use crate::exe_data::ExeClassData;
use crate::flavor::{self, ArtifactTavernText, TradeText, ARTIFACT_BLOCK_COUNT};
use crate::name_chunks::NameChunks;
use crate::name_gen::{self, RandomSource};
use crate::questions::{self, QuestionRecord};
use crate::spells::{self, SpellRecord};
use crate::template::TemplateText;
use crate::world_map::{self, WorldMapMask, WorldMapTerrain};
use crate::{Error, Result};

const TEMPLATE_FILE: &str = "TEMPLATE.DAT";
const QUESTION_FILE: &str = "QUESTION.TXT";
const CLASSES_FILE: &str = "CLASSES.DAT";
const DUNGEON_FILE: &str = "DUNGEON.TXT";
const ARTIFACT_FILE_1: &str = "ARTFACT1.DAT";
const ARTIFACT_FILE_2: &str = "ARTFACT2.DAT";
const EQUIPMENT_FILE: &str = "EQUIP.DAT";
const MAGES_GUILD_FILE: &str = "MUGUILD.DAT";
const SELLING_FILE: &str = "SELLING.DAT";
const TAVERN_FILE: &str = "TAVERN.DAT";
const NAME_CHUNK_FILE: &str = "NAMECHNK.DAT";
const SPELLS_FILE: &str = "SPELLSG.65";
const SPELL_MAKER_FILE: &str = "SPELLMKR.TXT";
const WORLD_MAP_FILE: &str = "TAMRIEL.MNU";
const TERRAIN_FILE: &str = "TERRAIN.IMG";

/// All decoded game-data tables.
#[derive(Debug)]
pub struct AssetTable {
    template_text: TemplateText,
    questions: Vec<QuestionRecord>,
    class_generation: ClassGeneration,
    class_definitions: Vec<ClassDefinition>,
    dungeons: Vec<DungeonEntry>,
    artifact_tavern_text_1: [ArtifactTavernText; ARTIFACT_BLOCK_COUNT],
    artifact_tavern_text_2: [ArtifactTavernText; ARTIFACT_BLOCK_COUNT],
    trade_text: TradeText,
    name_chunks: NameChunks,
    standard_spells: Vec<SpellRecord>,
    spell_maker_descriptions: Vec<String>,
    world_map_masks: Vec<WorldMapMask>,
    world_map_terrain: WorldMapTerrain,
}

impl AssetTable {
    /// Decode every table from the archive. Decode order matters only in
    /// that class synthesis reads the executable side data; it is kept in
    /// the original game's order regardless.
    pub fn load(vfs: &dyn Vfs, exe_data: &ExeClassData) -> Result<Self> {
        debug!("loading asset table");

        let template_text = TemplateText::parse(&text_resource(vfs, TEMPLATE_FILE)?);
        debug!(entries = template_text.len(), "parsed {TEMPLATE_FILE}");

        let questions = questions::parse_questions(&text_resource(vfs, QUESTION_FILE)?)?;
        debug!(count = questions.len(), "parsed {QUESTION_FILE}");

        let class_generation = ClassGeneration::decode(&vfs.open(CLASSES_FILE)?)?;
        let class_definitions = classes::synthesize_classes(exe_data)?;
        debug!(count = class_definitions.len(), "decoded {CLASSES_FILE}");

        let dungeons = dungeons::parse_dungeons(&text_resource(vfs, DUNGEON_FILE)?);
        debug!(count = dungeons.len(), "parsed {DUNGEON_FILE}");

        let artifact_tavern_text_1 = flavor::decode_artifact_text(&vfs.open(ARTIFACT_FILE_1)?)?;
        let artifact_tavern_text_2 = flavor::decode_artifact_text(&vfs.open(ARTIFACT_FILE_2)?)?;

        let trade_text = TradeText::new(
            flavor::decode_trade_functions(&vfs.open(EQUIPMENT_FILE)?)?,
            flavor::decode_trade_functions(&vfs.open(MAGES_GUILD_FILE)?)?,
            flavor::decode_trade_functions(&vfs.open(SELLING_FILE)?)?,
            flavor::decode_trade_functions(&vfs.open(TAVERN_FILE)?)?,
        );

        let name_chunks = NameChunks::decode(&vfs.open(NAME_CHUNK_FILE)?)?;
        let required = name_gen::max_rule_chunk_index() + 1;
        if name_chunks.len() < required {
            return Err(Error::malformed(
                "NAMECHNK.DAT",
                format!(
                    "name rules address {required} chunk lists, file holds {}",
                    name_chunks.len()
                ),
            ));
        }
        debug!(chunks = name_chunks.len(), "decoded {NAME_CHUNK_FILE}");

        // Filename casing differs between release media for this one.
        let standard_spells = spells::decode_spells(&vfs.open_case_insensitive(SPELLS_FILE)?)?;

        let spell_maker_descriptions =
            spells::parse_maker_descriptions(&text_resource(vfs, SPELL_MAKER_FILE)?)?;

        let world_map_masks = world_map::decode_world_map_masks(&vfs.open(WORLD_MAP_FILE)?)?;
        let world_map_terrain = WorldMapTerrain::decode(&vfs.open(TERRAIN_FILE)?)?;

        debug!("asset table ready");

        Ok(Self {
            template_text,
            questions,
            class_generation,
            class_definitions,
            dungeons,
            artifact_tavern_text_1,
            artifact_tavern_text_2,
            trade_text,
            name_chunks,
            standard_spells,
            spell_maker_descriptions,
            world_map_masks,
            world_map_terrain,
        })
    }

    /// Get the keyed template text.
    pub fn template_text(&self) -> &TemplateText {
        &self.template_text
    }

    /// Get the character-creation questions.
    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    /// Get the class-generation tables from CLASSES.DAT.
    pub fn class_generation(&self) -> &ClassGeneration {
        &self.class_generation
    }

    /// Get the synthesized class definitions.
    pub fn class_definitions(&self) -> &[ClassDefinition] {
        &self.class_definitions
    }

    /// Get the dungeon flavor entries.
    pub fn dungeons(&self) -> &[DungeonEntry] {
        &self.dungeons
    }

    /// Get the first artifact text variant.
    pub fn artifact_tavern_text_1(&self) -> &[ArtifactTavernText; ARTIFACT_BLOCK_COUNT] {
        &self.artifact_tavern_text_1
    }

    /// Get the second artifact text variant.
    pub fn artifact_tavern_text_2(&self) -> &[ArtifactTavernText; ARTIFACT_BLOCK_COUNT] {
        &self.artifact_tavern_text_2
    }

    /// Get the trade dialogue tables.
    pub fn trade_text(&self) -> &TradeText {
        &self.trade_text
    }

    /// Get the name-fragment chunk lists.
    pub fn name_chunks(&self) -> &NameChunks {
        &self.name_chunks
    }

    /// Get the standard spell records.
    pub fn standard_spells(&self) -> &[SpellRecord] {
        &self.standard_spells
    }

    /// Get the spell-maker description slots.
    pub fn spell_maker_descriptions(&self) -> &[String] {
        &self.spell_maker_descriptions
    }

    /// Get the world-map mask regions.
    pub fn world_map_masks(&self) -> &[WorldMapMask] {
        &self.world_map_masks
    }

    /// Get the world-map terrain grid.
    pub fn world_map_terrain(&self) -> &WorldMapTerrain {
        &self.world_map_terrain
    }

    /// Generate an NPC name for a race/gender pair.
    pub fn generate_name<R>(&self, race_id: usize, is_male: bool, random: &mut R) -> Result<String>
    where
        R: RandomSource + ?Sized,
    {
        name_gen::generate_name(&self.name_chunks, race_id, is_male, random)
    }
}

/// Open a resource and decode it as text.
fn text_resource(vfs: &dyn Vfs, name: &'static str) -> Result<String> {
    let bytes = vfs.open(name)?;
    String::from_utf8(bytes)
        .map_err(|_| Error::malformed(name, "text resource is not valid UTF-8"))
}
