use std::fmt;

use sha2::{Digest, Sha256};

use crate::ModelError;

/// A deterministic record identifier.
///
/// Ids are the first 16 bytes of a SHA-256 digest over the record's
/// provenance, rendered as lowercase hex. Re-ingesting the same source
/// row (or re-parsing the same assistant transcript) yields the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId([u8; 16]);

impl RecordId {
    /// Derives an id from provenance parts.
    ///
    /// Parts are hashed with a `\0` separator so that `["a", "bc"]` and
    /// `["ab", "c"]` produce distinct ids.
    pub fn derive(parts: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part.as_bytes());
            hasher.update([0u8]);
        }
        let digest: [u8; 32] = hasher.finalize().into();
        let mut out = [0u8; 16];
        out.copy_from_slice(&digest[..16]);
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(value: &str) -> Result<Self, ModelError> {
        let bytes =
            hex::decode(value).map_err(|_| ModelError::InvalidRecordId(value.to_string()))?;
        if bytes.len() != 16 {
            return Err(ModelError::InvalidRecordId(value.to_string()));
        }
        let mut out = [0u8; 16];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl serde::Serialize for RecordId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for RecordId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_is_deterministic() {
        let a = RecordId::derive(&["upload.csv", "0", "1000"]);
        let b = RecordId::derive(&["upload.csv", "0", "1000"]);
        assert_eq!(a, b);
        assert_eq!(a.to_hex().len(), 32);
    }

    #[test]
    fn derive_respects_part_boundaries() {
        let a = RecordId::derive(&["a", "bc"]);
        let b = RecordId::derive(&["ab", "c"]);
        assert_ne!(a, b);
    }

    #[test]
    fn hex_round_trip() {
        let id = RecordId::derive(&["x"]);
        let parsed = RecordId::from_hex(&id.to_hex()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(RecordId::from_hex("not hex").is_err());
        assert!(RecordId::from_hex("abcd").is_err());
    }
}
