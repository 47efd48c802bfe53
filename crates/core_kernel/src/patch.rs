//! Tri-state field values for partial updates
//!
//! A JSON body distinguishes "field omitted" from "field set to null".
//! `Patch<T>` keeps that distinction so an update touches only the fields
//! the caller named.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

/// One field of a partial update
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// Field not supplied; keep the current value
    #[default]
    Absent,
    /// Field explicitly cleared
    Null,
    /// Field replaced
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// Returns the new value, if one was supplied
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Writes into a nullable field
    pub fn apply_to(self, target: &mut Option<T>) {
        match self {
            Patch::Absent => {}
            Patch::Null => *target = None,
            Patch::Set(value) => *target = Some(value),
        }
    }

    /// Writes into a non-nullable field, rejecting an explicit null
    pub fn apply_required(self, field: &str, target: &mut T) -> Result<(), DomainError> {
        match self {
            Patch::Absent => Ok(()),
            Patch::Null => Err(DomainError::validation(format!("{field} cannot be null"))),
            Patch::Set(value) => {
                *target = value;
                Ok(())
            }
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Set(v),
            None => Patch::Null,
        }
    }
}

// Pair with `#[serde(default)]`: a missing key never reaches this impl.
impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Patch::Set(value) => serializer.serialize_some(value),
            _ => serializer.serialize_none(),
        }
    }
}
