//! Strongly-typed identifier value objects.
//!
//! Uuid-backed ids are minted locally. String-backed ids are assigned by the
//! analysis API or are fixed template keys, and only need to be non-blank.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Mints a new random id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps `id`, rejecting blank values.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(id))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

uuid_id!(
    /// Identity of an item inside an ordered section.
    ///
    /// Minted fresh on every conversion from the wire report. The identity is
    /// a client session concept and is never sent back to the analysis API.
    ItemId
);

uuid_id!(
    /// Identity of a persisted snapshot.
    SnapshotId
);

string_id!(
    /// Key of a template held by the analysis store (e.g. `"manual_report"`).
    TemplateId,
    "template_id"
);

string_id!(
    /// Identifier the analysis API assigns to an uploaded transcript.
    ///
    /// Doubles as the task id snapshots are keyed by.
    FileId,
    "file_id"
);

impl TemplateId {
    /// Builds an id from a known-good constant.
    pub(crate) fn from_static(id: &'static str) -> Self {
        Self(id.to_string())
    }
}
