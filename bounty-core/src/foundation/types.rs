use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

macro_rules! define_id_type {
    (string $name:ident) => {
        #[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Deref for $name {
            type Target = str;
            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };

    (u32 $name:ident) => {
        #[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            pub const fn value(&self) -> u32 {
                self.0
            }

            /// Fixed-width little-endian encoding, the byte form every
            /// derivation seed uses.
            pub const fn to_le_bytes(&self) -> [u8; 4] {
                self.0.to_le_bytes()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id_type!(string DeliveryId);
define_id_type!(string TxSignature);
define_id_type!(u32 RepositoryId);
define_id_type!(u32 IssueNumber);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_encode_little_endian() {
        let repo = RepositoryId::new(0x0102_0304);
        assert_eq!(repo.to_le_bytes(), [0x04, 0x03, 0x02, 0x01]);
        assert_eq!(repo.value(), 0x0102_0304);
        assert_eq!(repo.to_string(), "16909060");
    }

    #[test]
    fn numeric_ids_serde_json_is_plain_number() {
        let issue = IssueNumber::new(7);
        let json = serde_json::to_string(&issue).expect("serialize json");
        assert_eq!(json, "7");
        let decoded: IssueNumber = serde_json::from_str(&json).expect("deserialize json");
        assert_eq!(decoded, issue);
    }

    #[test]
    fn string_ids_round_trip() {
        let delivery = DeliveryId::from("72d3162e-cc78-11e3-81ab-4c9367dc0958");
        assert_eq!(delivery.as_str(), "72d3162e-cc78-11e3-81ab-4c9367dc0958");
        let sig = TxSignature::new("5VERYLongBase58Signature");
        assert_eq!(sig.to_string(), "5VERYLongBase58Signature");
    }
}
