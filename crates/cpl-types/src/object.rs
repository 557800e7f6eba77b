use std::fmt;

use serde::{Deserialize, Serialize};

/// Globally-unique identifier of a provenance object.
///
/// An `ObjectId` is a pair of 64-bit halves assigned by the engine when the
/// object is created. It is never reused and never changes. Two ids are equal
/// iff both halves are equal; ordering compares `hi` first, then `lo`.
///
/// The textual form (`hi:lo` in hexadecimal) is for diagnostics only and is
/// not a lookup key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ObjectId {
    hi: u64,
    lo: u64,
}

impl ObjectId {
    /// The null object ID. Represents "no object" (e.g. no container).
    pub const NULL: ObjectId = ObjectId { hi: 0, lo: 0 };

    /// Create an `ObjectId` from its two halves.
    pub const fn new(hi: u64, lo: u64) -> Self {
        Self { hi, lo }
    }

    /// The null object ID.
    pub const fn null() -> Self {
        Self::NULL
    }

    /// Returns `true` if this is the null object ID.
    pub fn is_null(&self) -> bool {
        self.hi == 0 && self.lo == 0
    }

    /// The high 64 bits.
    pub fn hi(&self) -> u64 {
        self.hi
    }

    /// The low 64 bits.
    pub fn lo(&self) -> u64 {
        self.lo
    }

    /// Big-endian 16-byte encoding (`hi` first).
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[..8].copy_from_slice(&self.hi.to_be_bytes());
        out[8..].copy_from_slice(&self.lo.to_be_bytes());
        out
    }

    /// Decode from the big-endian 16-byte encoding.
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        let mut hi = [0u8; 8];
        let mut lo = [0u8; 8];
        hi.copy_from_slice(&bytes[..8]);
        lo.copy_from_slice(&bytes[8..]);
        Self {
            hi: u64::from_be_bytes(hi),
            lo: u64::from_be_bytes(lo),
        }
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({self})")
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}:{:x}", self.hi, self.lo)
    }
}

impl From<(u64, u64)> for ObjectId {
    fn from((hi, lo): (u64, u64)) -> Self {
        Self { hi, lo }
    }
}

impl From<ObjectId> for (u64, u64) {
    fn from(id: ObjectId) -> Self {
        (id.hi, id.lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use proptest::prelude::*;

    fn hash_of(id: &ObjectId) -> u64 {
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn null_is_all_zeros() {
        let null = ObjectId::null();
        assert!(null.is_null());
        assert_eq!(null, ObjectId::NULL);
        assert_eq!(null.to_bytes(), [0u8; 16]);
    }

    #[test]
    fn assigned_ids_are_not_null() {
        assert!(!ObjectId::new(1, 0).is_null());
        assert!(!ObjectId::new(0, 1).is_null());
        assert_ne!(ObjectId::new(1, 1), ObjectId::NULL);
    }

    #[test]
    fn halves_must_both_match() {
        assert_ne!(ObjectId::new(1, 2), ObjectId::new(1, 3));
        assert_ne!(ObjectId::new(1, 2), ObjectId::new(2, 2));
        assert_ne!(ObjectId::new(1, 2), ObjectId::new(2, 1));
    }

    #[test]
    fn display_is_hex_hi_colon_lo() {
        assert_eq!(ObjectId::new(1, 1).to_string(), "1:1");
        assert_eq!(ObjectId::new(0xab, 0x10).to_string(), "ab:10");
        assert_eq!(format!("{:?}", ObjectId::new(2, 255)), "ObjectId(2:ff)");
    }

    #[test]
    fn bytes_are_big_endian_hi_first() {
        let id = ObjectId::new(1, 2);
        let bytes = id.to_bytes();
        assert_eq!(bytes[7], 1);
        assert_eq!(bytes[15], 2);
        assert_eq!(ObjectId::from_bytes(bytes), id);
    }

    #[test]
    fn ordering_compares_hi_first() {
        assert!(ObjectId::new(0, u64::MAX) < ObjectId::new(1, 0));
        assert!(ObjectId::new(1, 1) < ObjectId::new(1, 2));
    }

    #[test]
    fn serde_roundtrip() {
        let id = ObjectId::new(0xdead, 0xbeef);
        let json = serde_json::to_string(&id).unwrap();
        let parsed: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    proptest! {
        #[test]
        fn equality_iff_both_halves_equal(a_hi: u64, a_lo: u64, b_hi: u64, b_lo: u64) {
            let a = ObjectId::new(a_hi, a_lo);
            let b = ObjectId::new(b_hi, b_lo);
            prop_assert_eq!(a == b, a_hi == b_hi && a_lo == b_lo);
        }

        #[test]
        fn equal_ids_hash_equally(hi: u64, lo: u64) {
            let a = ObjectId::new(hi, lo);
            let b = ObjectId::from((hi, lo));
            prop_assert_eq!(a, b);
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }
    }
}
