//! Newtype IDs for backend-issued identifiers.
//!
//! The backend hands out ids as JSON strings or integers depending on the
//! endpoint. Each id remembers which form it arrived in so it can be sent
//! back exactly as received.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Eq)]
        pub struct $name {
            value: String,
            numeric: bool,
        }

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self {
                    value: id.into(),
                    numeric: false,
                }
            }

            /// Create an ID that serializes as a JSON integer.
            pub fn from_number(n: i64) -> Self {
                Self {
                    value: n.to_string(),
                    numeric: true,
                }
            }

            /// Create an ID from any JSON number, kept as written.
            pub fn from_json_number(n: &Number) -> Self {
                Self {
                    value: n.to_string(),
                    numeric: true,
                }
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.value
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.value
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.value == other.value
            }
        }

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.value.hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.value)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.value
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match (self.numeric, self.value.parse::<Number>()) {
                    (true, Ok(n)) => n.serialize(serializer),
                    _ => serializer.serialize_str(&self.value),
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                Ok(match RawId::deserialize(deserializer)? {
                    RawId::Text(s) => Self::new(s),
                    RawId::Number(n) => Self::from_json_number(&n),
                })
            }
        }
    };
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(Number),
}

define_id!(
    /// Catalog product identifier.
    ProductId
);
define_id!(
    /// Correlation token linking an AI analysis to a later registration.
    AnalyzeId
);
define_id!(
    /// Purchasable option of a product (e.g. a 2kg box).
    OptionId
);
