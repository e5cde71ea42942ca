//! Artifact and trade dialogue text (ARTFACT1.DAT, ARTFACT2.DAT, EQUIP.DAT,
//! MUGUILD.DAT, SELLING.DAT, TAVERN.DAT).
//!
//! These files are nothing but null-terminated strings packed back to back;
//! the structure is entirely positional. Decoding walks the buffer filling
//! fixed-shape nested arrays, and a buffer with too few strings is a
//! malformed file.

use anvil_common::BinaryReader;

use crate::{Error, Result};

/// Number of artifact text blocks per file.
pub const ARTIFACT_BLOCK_COUNT: usize = 16;

/// Number of conversation functions per trade file.
pub const TRADE_FUNCTION_COUNT: usize = 4;

/// Number of personality variants per conversation function.
pub const TRADE_PERSONALITY_COUNT: usize = 5;

/// Number of random variants per personality.
pub const TRADE_VARIANT_COUNT: usize = 3;

/// Tavern conversation lines about one artifact.
#[derive(Debug, Clone, Default)]
pub struct ArtifactTavernText {
    greetings: [String; 3],
    barter_successes: [String; 3],
    offer_refusals: [String; 3],
    barter_failures: [String; 3],
    counter_offers: [String; 3],
}

impl ArtifactTavernText {
    pub fn greetings(&self) -> &[String; 3] {
        &self.greetings
    }

    pub fn barter_successes(&self) -> &[String; 3] {
        &self.barter_successes
    }

    pub fn offer_refusals(&self) -> &[String; 3] {
        &self.offer_refusals
    }

    pub fn barter_failures(&self) -> &[String; 3] {
        &self.barter_failures
    }

    pub fn counter_offers(&self) -> &[String; 3] {
        &self.counter_offers
    }
}

/// Decode one artifact text file into its sixteen blocks.
pub fn decode_artifact_text(data: &[u8]) -> Result<[ArtifactTavernText; ARTIFACT_BLOCK_COUNT]> {
    let mut reader = BinaryReader::new(data);
    let mut blocks: [ArtifactTavernText; ARTIFACT_BLOCK_COUNT] = Default::default();

    for block in &mut blocks {
        fill_strings(&mut reader, &mut block.greetings, "artifact text")?;
        fill_strings(&mut reader, &mut block.barter_successes, "artifact text")?;
        fill_strings(&mut reader, &mut block.offer_refusals, "artifact text")?;
        fill_strings(&mut reader, &mut block.barter_failures, "artifact text")?;
        fill_strings(&mut reader, &mut block.counter_offers, "artifact text")?;
    }

    Ok(blocks)
}

/// The nested string table of one trade file:
/// function x personality x random variant.
pub type TradeFunctions =
    [[[String; TRADE_VARIANT_COUNT]; TRADE_PERSONALITY_COUNT]; TRADE_FUNCTION_COUNT];

/// Trade dialogue for all four shop conversations.
#[derive(Debug, Clone, Default)]
pub struct TradeText {
    equipment: TradeFunctions,
    mages_guild: TradeFunctions,
    selling: TradeFunctions,
    tavern: TradeFunctions,
}

impl TradeText {
    /// Build from the four decoded trade files.
    pub fn new(
        equipment: TradeFunctions,
        mages_guild: TradeFunctions,
        selling: TradeFunctions,
        tavern: TradeFunctions,
    ) -> Self {
        Self {
            equipment,
            mages_guild,
            selling,
            tavern,
        }
    }

    pub fn equipment(&self) -> &TradeFunctions {
        &self.equipment
    }

    pub fn mages_guild(&self) -> &TradeFunctions {
        &self.mages_guild
    }

    pub fn selling(&self) -> &TradeFunctions {
        &self.selling
    }

    pub fn tavern(&self) -> &TradeFunctions {
        &self.tavern
    }
}

/// Decode one trade file's nested string table.
pub fn decode_trade_functions(data: &[u8]) -> Result<TradeFunctions> {
    let mut reader = BinaryReader::new(data);
    let mut functions: TradeFunctions = Default::default();

    for personality in functions.iter_mut().flatten() {
        fill_strings(&mut reader, personality, "trade text")?;
    }

    Ok(functions)
}

fn fill_strings<const N: usize>(
    reader: &mut BinaryReader<'_>,
    slots: &mut [String; N],
    resource: &'static str,
) -> Result<()> {
    for slot in slots {
        *slot = reader
            .read_cstring()
            .map_err(|err| match err {
                anvil_common::Error::MissingNullTerminator => {
                    Error::malformed(resource, "fewer strings than the fixed shape requires")
                }
                other => Error::Common(other),
            })?
            .to_string();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed_strings(count: usize) -> Vec<u8> {
        let mut data = Vec::new();
        for i in 0..count {
            data.extend_from_slice(format!("line {i}").as_bytes());
            data.push(0);
        }
        data
    }

    #[test]
    fn test_artifact_text_fills_in_order() {
        let data = packed_strings(ARTIFACT_BLOCK_COUNT * 5 * 3);
        let blocks = decode_artifact_text(&data).unwrap();

        assert_eq!(blocks[0].greetings()[0], "line 0");
        assert_eq!(blocks[0].barter_successes()[0], "line 3");
        assert_eq!(blocks[0].counter_offers()[2], "line 14");
        assert_eq!(blocks[1].greetings()[0], "line 15");
        assert_eq!(blocks[15].counter_offers()[2], "line 239");
    }

    #[test]
    fn test_artifact_text_underflow_fails() {
        let data = packed_strings(ARTIFACT_BLOCK_COUNT * 5 * 3 - 1);
        assert!(matches!(
            decode_artifact_text(&data),
            Err(Error::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_trade_text_traversal_order() {
        let total = TRADE_FUNCTION_COUNT * TRADE_PERSONALITY_COUNT * TRADE_VARIANT_COUNT;
        let functions = decode_trade_functions(&packed_strings(total)).unwrap();

        assert_eq!(functions[0][0][0], "line 0");
        assert_eq!(functions[0][0][2], "line 2");
        assert_eq!(functions[0][1][0], "line 3");
        assert_eq!(functions[1][0][0], "line 15");
        assert_eq!(functions[3][4][2], "line 59");
    }

    #[test]
    fn test_trade_text_underflow_fails() {
        let total = TRADE_FUNCTION_COUNT * TRADE_PERSONALITY_COUNT * TRADE_VARIANT_COUNT;
        assert!(decode_trade_functions(&packed_strings(total - 5)).is_err());
    }
}
