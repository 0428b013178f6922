//! Parameter identity - the binding key for every parameter reference

use crate::ValueType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Opaque identity of a lambda parameter, backed by a UUIDv7
///
/// Identities are compared by value of the token, never by the parameter's
/// display name: two unrelated parameters both called `p` stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterId(Uuid);

impl ParameterId {
    /// Generate a fresh identity
    ///
    /// # Examples
    ///
    /// ```
    /// use predix_expr::ParameterId;
    ///
    /// assert_ne!(ParameterId::new(), ParameterId::new());
    /// ```
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing UUID (deserialization, fixtures)
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an identity from its UUID string form
    pub fn parse(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid parameter id: {}", e))
    }

    /// The underlying UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ParameterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A declared lambda parameter
///
/// Equality and hashing look at `id` only; `name` exists for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Binding identity
    pub id: ParameterId,
    /// Display name
    pub name: String,
    /// Declared type
    pub ty: ValueType,
}

impl Parameter {
    /// Declare a new parameter with a fresh identity
    pub fn new(name: impl Into<String>, ty: ValueType) -> Self {
        Self {
            id: ParameterId::new(),
            name: name.into(),
            ty,
        }
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Parameter {}

impl Hash for Parameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
