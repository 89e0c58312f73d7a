//! Store-assigned document identifiers.
//!
//! A [`DocumentId`] is 12 opaque bytes rendered as 24 lowercase hex digits.
//! The core never generates ids; it only parses them from request paths and
//! carries them between the store and the wire.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::CoreError;

/// Opaque identifier assigned by the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId([u8; DocumentId::LEN]);

impl DocumentId {
    /// Number of raw bytes in an id.
    pub const LEN: usize = 12;

    /// Wraps raw bytes produced by a store backend.
    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        DocumentId(bytes)
    }

    /// The all-zero id. Stores never assign it, so it matches nothing.
    pub const fn nil() -> Self {
        DocumentId([0; Self::LEN])
    }

    pub fn is_nil(&self) -> bool {
        self.0 == [0; Self::LEN]
    }

    pub fn bytes(&self) -> [u8; Self::LEN] {
        self.0
    }

    /// Parses exactly 24 hex digits (either case).
    pub fn parse_str(input: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidDocumentId {
            input: input.to_string(),
        };
        let raw = input.as_bytes();
        if raw.len() != Self::LEN * 2 {
            return Err(invalid());
        }
        let mut bytes = [0u8; Self::LEN];
        for (slot, pair) in bytes.iter_mut().zip(raw.chunks_exact(2)) {
            let hi = hex_value(pair[0]).ok_or_else(invalid)?;
            let lo = hex_value(pair[1]).ok_or_else(invalid)?;
            *slot = (hi << 4) | lo;
        }
        Ok(DocumentId(bytes))
    }

    /// Parses a path segment, falling back to [`DocumentId::nil`] when the
    /// segment is not a valid id.
    ///
    /// Update and delete keep going with the nil id instead of rejecting the
    /// request; the store then simply reports zero matches.
    pub fn parse_or_nil(input: &str) -> Self {
        Self::parse_str(input).unwrap_or_else(|_| Self::nil())
    }
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for DocumentId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexVisitor;

        impl Visitor<'_> for HexVisitor {
            type Value = DocumentId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a 24-digit hex document id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<DocumentId, E> {
                DocumentId::parse_str(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn display_is_lowercase_hex() {
        let id = DocumentId::from_bytes([0xab, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0xff]);
        assert_eq!(id.to_string(), "ab00010203040506070809ff");
    }

    #[test]
    fn parse_accepts_uppercase() {
        let id = DocumentId::parse_str("AB00010203040506070809FF").unwrap();
        assert_eq!(id.bytes()[0], 0xab);
        assert_eq!(id.bytes()[11], 0xff);
    }

    #[test]
    fn parse_rejects_wrong_length_and_non_hex() {
        assert!(DocumentId::parse_str("").is_err());
        assert!(DocumentId::parse_str("abc").is_err());
        assert!(DocumentId::parse_str("zz00010203040506070809ff").is_err());
        assert!(DocumentId::parse_str("ab00010203040506070809ff00").is_err());
    }

    #[test]
    fn parse_or_nil_falls_back_silently() {
        let id = DocumentId::parse_or_nil("not-an-id");
        assert!(id.is_nil());
        assert_eq!(id.to_string(), "000000000000000000000000");
    }

    #[test]
    fn serde_uses_hex_string() {
        let id = DocumentId::from_bytes([1; 12]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"010101010101010101010101\"");

        let err = serde_json::from_str::<DocumentId>("\"nope\"");
        assert!(err.is_err());
    }

    proptest! {
        #[test]
        fn display_then_parse_is_identity(bytes in proptest::array::uniform12(any::<u8>())) {
            let id = DocumentId::from_bytes(bytes);
            prop_assert_eq!(DocumentId::parse_str(&id.to_string()).unwrap(), id);
        }
    }
}
