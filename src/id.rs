use core::fmt;

/// A 64-bit snowflake-style ID
///
/// - 1 bit reserved (always 0; IDs are non-negative)
/// - 42 bits timestamp (ms since [`DEFAULT_EPOCH`])
/// - 9 bits worker ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63           63 62            21 20            12 11             0
///              +--------------+----------------+----------------+---------------+
///  Field:      | reserved (1) | timestamp (42) | worker ID (9)  | sequence (12) |
///              +--------------+----------------+----------------+---------------+
///              |<----------- MSB ---------- 64 bits ----------- LSB ----------->|
/// ```
///
/// The raw scalar is `i64` so IDs serialize as plain integers in JSON,
/// database columns, or binary fields. Use the field accessors to decode an
/// ID of unknown origin; [`Worker::break_down`] only decodes IDs the worker
/// itself minted.
///
/// [`DEFAULT_EPOCH`]: crate::DEFAULT_EPOCH
/// [`Worker::break_down`]: crate::Worker::break_down
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeId {
    id: i64,
}

impl SnowflakeId {
    /// Bitmask for extracting the 42-bit timestamp field. Occupies bits 21
    /// through 62.
    pub const TIMESTAMP_MASK: i64 = (1 << 42) - 1;

    /// Bitmask for extracting the 9-bit worker ID field. Occupies bits 12
    /// through 20.
    pub const WORKER_ID_MASK: i64 = (1 << 9) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: i64 = (1 << 12) - 1;

    /// Number of bits to shift the timestamp to its correct position (bit 21).
    pub const TIMESTAMP_SHIFT: i64 = 21;

    /// Number of bits to shift the worker ID to its correct position (bit 12).
    pub const WORKER_ID_SHIFT: i64 = 12;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: i64 = 0;

    /// Packs the given components into an ID. Each component is masked to
    /// its field width first.
    pub const fn from_parts(timestamp: i64, worker_id: i64, sequence: i64) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let worker_id = (worker_id & Self::WORKER_ID_MASK) << Self::WORKER_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | worker_id | sequence,
        }
    }

    /// Extracts the timestamp from the packed ID.
    pub const fn timestamp(&self) -> i64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the worker ID from the packed ID.
    pub const fn worker_id(&self) -> i64 {
        (self.id >> Self::WORKER_ID_SHIFT) & Self::WORKER_ID_MASK
    }

    /// Extracts the sequence number from the packed ID.
    pub const fn sequence(&self) -> i64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// Returns the raw `i64` representation.
    pub const fn to_raw(&self) -> i64 {
        self.id
    }

    /// Reinterprets a raw `i64` as an ID without validation. Use
    /// [`Self::is_valid`] to check the reserved sign bit.
    pub const fn from_raw(raw: i64) -> Self {
        Self { id: raw }
    }

    /// Returns true if the reserved sign bit is clear.
    pub const fn is_valid(&self) -> bool {
        self.id >= 0
    }

    /// Returns the ID as a zero-padded 19-digit string, suitable for
    /// lexicographic sorting.
    pub fn to_padded_string(&self) -> String {
        format!("{:019}", self.id)
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("id", &format_args!("{} (0x{:x})", self.id, self.id))
            .field("timestamp", &self.timestamp())
            .field("worker_id", &self.worker_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_fields_and_bounds() {
        let id = SnowflakeId::from_parts(
            SnowflakeId::TIMESTAMP_MASK,
            SnowflakeId::WORKER_ID_MASK,
            SnowflakeId::SEQUENCE_MASK,
        );
        assert_eq!(id.timestamp(), SnowflakeId::TIMESTAMP_MASK);
        assert_eq!(id.worker_id(), SnowflakeId::WORKER_ID_MASK);
        assert_eq!(id.sequence(), SnowflakeId::SEQUENCE_MASK);
        assert_eq!(id.to_raw(), i64::MAX);
        assert!(id.is_valid());
    }

    #[test]
    fn low_bit_fields() {
        let id = SnowflakeId::from_parts(0, 0, 0);
        assert_eq!(id.to_raw(), 0);

        let id = SnowflakeId::from_parts(1, 1, 1);
        assert_eq!(id.timestamp(), 1);
        assert_eq!(id.worker_id(), 1);
        assert_eq!(id.sequence(), 1);
        assert_eq!(id.to_raw(), (1 << 21) | (1 << 12) | 1);
    }

    #[test]
    fn from_parts_masks_overflowing_components() {
        let id = SnowflakeId::from_parts(1 << 42, 1 << 9, 1 << 12);
        assert_eq!(id.to_raw(), 0);

        let id = SnowflakeId::from_parts(0, (1 << 9) | 3, (1 << 12) | 7);
        assert_eq!(id.worker_id(), 3);
        assert_eq!(id.sequence(), 7);
    }

    #[test]
    fn raw_roundtrip_and_validity() {
        let id = SnowflakeId::from_raw(3_308_903_202_816_032_769);
        assert_eq!(id.timestamp(), 1_577_808_000_000);
        assert_eq!(id.worker_id(), 8);
        assert_eq!(id.sequence(), 1);
        assert!(id.is_valid());

        assert!(!SnowflakeId::from_raw(-1).is_valid());
    }

    #[test]
    fn display_and_padding() {
        let id = SnowflakeId::from_parts(1, 1, 1);
        assert_eq!(id.to_string(), id.to_raw().to_string());
        assert_eq!(id.to_padded_string().len(), 19);
        assert_eq!(
            SnowflakeId::from_raw(42).to_padded_string(),
            "0000000000000000042"
        );
    }

    #[test]
    fn ordering_follows_raw_value() {
        let older = SnowflakeId::from_parts(41, 8, 4095);
        let newer = SnowflakeId::from_parts(42, 8, 0);
        assert!(older < newer);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip_as_plain_integer() {
        let id = SnowflakeId::from_raw(3_308_903_202_816_032_769);
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "3308903202816032769");
        let back: SnowflakeId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
