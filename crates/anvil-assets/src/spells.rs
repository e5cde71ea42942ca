//! Standard spells (SPELLSG.65) and spell-maker descriptions (SPELLMKR.TXT).

use anvil_common::BinaryReader;

use crate::text::lines;
use crate::{Error, Result};

/// Number of standard spell slots.
pub const SPELL_COUNT: usize = 128;

/// Size of one spell record in bytes.
pub const SPELL_RECORD_SIZE: usize = 85;

/// Number of (low, mid, high) parameter triples per spell.
pub const SPELL_PARAM_COUNT: usize = 6;

/// Size of the fixed name buffer at the tail of a record.
pub const SPELL_NAME_LEN: usize = 33;

/// Number of spell-maker description slots.
pub const SPELL_MAKER_SLOT_COUNT: usize = 43;

/// One decoded 85-byte spell record.
#[derive(Debug, Clone)]
pub struct SpellRecord {
    params: [[u16; 3]; SPELL_PARAM_COUNT],
    target_type: u8,
    unknown: u8,
    element: u8,
    flags: u16,
    effects: [u8; 3],
    sub_effects: [u8; 3],
    affected_attributes: [u8; 3],
    cost: u16,
    name: [u8; SPELL_NAME_LEN],
}

impl SpellRecord {
    /// Decode one record from its fixed 85-byte layout.
    fn decode(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let mut params = [[0u16; 3]; SPELL_PARAM_COUNT];
        for triple in &mut params {
            triple[0] = reader.read_u16()?;
            triple[1] = reader.read_u16()?;
            triple[2] = reader.read_u16()?;
        }

        let target_type = reader.read_u8()?;
        let unknown = reader.read_u8()?;
        let element = reader.read_u8()?;
        let flags = reader.read_u16()?;

        let mut effects = [0u8; 3];
        let mut sub_effects = [0u8; 3];
        let mut affected_attributes = [0u8; 3];
        for slot in &mut effects {
            *slot = reader.read_u8()?;
        }
        for slot in &mut sub_effects {
            *slot = reader.read_u8()?;
        }
        for slot in &mut affected_attributes {
            *slot = reader.read_u8()?;
        }

        let cost = reader.read_u16()?;

        let name_bytes = reader.read_bytes(SPELL_NAME_LEN)?;
        // Reject non-UTF-8 name bytes here so name() can stay infallible.
        let terminator = name_bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(SPELL_NAME_LEN);
        std::str::from_utf8(&name_bytes[..terminator])
            .map_err(anvil_common::Error::Utf8)
            .map_err(Error::Common)?;

        let mut name = [0u8; SPELL_NAME_LEN];
        name.copy_from_slice(name_bytes);

        Ok(Self {
            params,
            target_type,
            unknown,
            element,
            flags,
            effects,
            sub_effects,
            affected_attributes,
            cost,
            name,
        })
    }

    /// Get the (low, mid, high) parameter triples.
    pub fn params(&self) -> &[[u16; 3]; SPELL_PARAM_COUNT] {
        &self.params
    }

    pub fn target_type(&self) -> u8 {
        self.target_type
    }

    pub fn unknown(&self) -> u8 {
        self.unknown
    }

    pub fn element(&self) -> u8 {
        self.element
    }

    pub fn flags(&self) -> u16 {
        self.flags
    }

    pub fn effects(&self) -> &[u8; 3] {
        &self.effects
    }

    pub fn sub_effects(&self) -> &[u8; 3] {
        &self.sub_effects
    }

    pub fn affected_attributes(&self) -> &[u8; 3] {
        &self.affected_attributes
    }

    pub fn cost(&self) -> u16 {
        self.cost
    }

    /// Get the raw fixed-width name buffer.
    pub fn name_bytes(&self) -> &[u8; SPELL_NAME_LEN] {
        &self.name
    }

    /// Get the spell name up to its null terminator.
    pub fn name(&self) -> &str {
        let terminator = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(SPELL_NAME_LEN);
        // Validated during decode.
        std::str::from_utf8(&self.name[..terminator]).unwrap_or("")
    }
}

/// Decode the 128 standard spell records.
pub fn decode_spells(data: &[u8]) -> Result<Vec<SpellRecord>> {
    if data.len() < SPELL_COUNT * SPELL_RECORD_SIZE {
        return Err(Error::malformed(
            "SPELLSG.65",
            format!(
                "need {} bytes for {SPELL_COUNT} records, got {}",
                SPELL_COUNT * SPELL_RECORD_SIZE,
                data.len()
            ),
        ));
    }

    let mut reader = BinaryReader::new(data);
    let mut spells = Vec::with_capacity(SPELL_COUNT);
    for _ in 0..SPELL_COUNT {
        spells.push(SpellRecord::decode(&mut reader)?);
    }

    Ok(spells)
}

/// Parse the spell-maker description file into its fixed 43 slots.
///
/// A `#NN` line opens slot NN and flushes the previous one; a `#` line too
/// short to carry an index stops parsing entirely. Slots never opened stay
/// empty.
pub fn parse_maker_descriptions(text: &str) -> Result<Vec<String>> {
    let mut slots = vec![String::new(); SPELL_MAKER_SLOT_COUNT];
    let mut active: Option<(usize, String)> = None;

    for line in lines(text) {
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix('#') {
            if let Some((index, description)) = active.take() {
                slots[index] = description;
            }

            if rest.len() >= 2 {
                let digits = rest.get(..2).ok_or_else(|| {
                    Error::malformed("SPELLMKR.TXT", "slot index is not two characters")
                })?;
                let index: usize = digits.parse().map_err(|_| {
                    Error::malformed(
                        "SPELLMKR.TXT",
                        format!("slot index {digits:?} is not a number"),
                    )
                })?;

                if index >= SPELL_MAKER_SLOT_COUNT {
                    return Err(Error::IndexOutOfRange {
                        index,
                        limit: SPELL_MAKER_SLOT_COUNT,
                    });
                }

                active = Some((index, String::new()));
            } else {
                break;
            }
        } else if let Some((_, description)) = active.as_mut() {
            description.push_str(line);
        }
    }

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spell_bytes(fill: impl Fn(usize, &mut [u8])) -> Vec<u8> {
        let mut data = vec![0u8; SPELL_COUNT * SPELL_RECORD_SIZE];
        for index in 0..SPELL_COUNT {
            let record = &mut data[index * SPELL_RECORD_SIZE..(index + 1) * SPELL_RECORD_SIZE];
            fill(index, record);
        }
        data
    }

    #[test]
    fn test_decode_record_offsets() {
        let data = spell_bytes(|index, record| {
            if index != 7 {
                return;
            }
            // First and last parameter triples.
            record[0..2].copy_from_slice(&100u16.to_le_bytes());
            record[4..6].copy_from_slice(&300u16.to_le_bytes());
            record[30..32].copy_from_slice(&7u16.to_le_bytes());
            // Scalar fields.
            record[36] = 2; // target type
            record[37] = 9; // unknown
            record[38] = 4; // element
            record[39..41].copy_from_slice(&0x0102u16.to_le_bytes());
            // Effect triples.
            record[41] = 11;
            record[44] = 22;
            record[47] = 33;
            record[50..52].copy_from_slice(&450u16.to_le_bytes());
            // Name.
            record[52..57].copy_from_slice(b"Frost");
        });

        let spells = decode_spells(&data).unwrap();
        assert_eq!(spells.len(), SPELL_COUNT);

        let spell = &spells[7];
        assert_eq!(spell.params()[0], [100, 0, 300]);
        assert_eq!(spell.params()[5][0], 7);
        assert_eq!(spell.target_type(), 2);
        assert_eq!(spell.unknown(), 9);
        assert_eq!(spell.element(), 4);
        assert_eq!(spell.flags(), 0x0102);
        assert_eq!(spell.effects()[0], 11);
        assert_eq!(spell.sub_effects()[0], 22);
        assert_eq!(spell.affected_attributes()[0], 33);
        assert_eq!(spell.cost(), 450);
        assert_eq!(spell.name(), "Frost");

        // Untouched records decode as all-zero.
        assert_eq!(spells[0].name(), "");
        assert_eq!(spells[0].cost(), 0);
    }

    #[test]
    fn test_decode_short_buffer_fails() {
        let data = vec![0u8; SPELL_COUNT * SPELL_RECORD_SIZE - 1];
        assert!(matches!(
            decode_spells(&data),
            Err(Error::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_maker_descriptions_scenario() {
        let slots = parse_maker_descriptions("#01\nFirst\n#02\nSecond\n#\n").unwrap();

        assert_eq!(slots[1], "First");
        assert_eq!(slots[2], "Second");
        assert!(slots[0].is_empty());
    }

    #[test]
    fn test_bare_marker_stops_parsing() {
        let slots = parse_maker_descriptions("#01\nFirst\n#\n#02\nIgnored\n").unwrap();

        assert_eq!(slots[1], "First");
        assert!(slots[2].is_empty());
    }

    #[test]
    fn test_multi_line_description_concatenates() {
        let slots = parse_maker_descriptions("#05\r\npart one \r\npart two\r\n#\r\n").unwrap();
        assert_eq!(slots[5], "part one \rpart two\r");
    }

    #[test]
    fn test_slot_open_at_eof_is_dropped() {
        let slots = parse_maker_descriptions("#01\nKept\n#02\nLost at eof\n").unwrap();

        assert_eq!(slots[1], "Kept");
        assert!(slots[2].is_empty());
    }

    #[test]
    fn test_out_of_range_slot_fails() {
        assert!(matches!(
            parse_maker_descriptions("#43\nToo far\n#\n"),
            Err(Error::IndexOutOfRange { index: 43, .. })
        ));
    }

    #[test]
    fn test_non_numeric_slot_fails() {
        assert!(matches!(
            parse_maker_descriptions("#xy\nText\n#\n"),
            Err(Error::MalformedRecord { .. })
        ));
    }
}
