//! Cached attribute state for object handles.

use std::fmt;

use cpl_types::ObjectInfo;

/// What a handle knows about one optional attribute.
///
/// Keeps "not fetched yet" apart from "fetched and empty".
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Attribute<T> {
    /// Not yet known to this handle.
    Unknown,
    /// Known to be absent.
    Absent,
    /// Known value.
    Present(T),
}

impl<T> Attribute<T> {
    /// Build a known state from an optional value.
    pub fn known(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Present(v),
            None => Self::Absent,
        }
    }

    /// Returns `true` unless the state is [`Attribute::Unknown`].
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// The value, if present.
    pub fn present(&self) -> Option<&T> {
        match self {
            Self::Present(v) => Some(v),
            _ => None,
        }
    }
}

/// The natural key of an object: `(originator, name, type)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    pub originator: String,
    pub name: String,
    pub object_type: String,
}

impl ObjectKey {
    pub fn new(
        originator: impl Into<String>,
        name: impl Into<String>,
        object_type: impl Into<String>,
    ) -> Self {
        Self {
            originator: originator.into(),
            name: name.into(),
            object_type: object_type.into(),
        }
    }
}

impl From<&ObjectInfo> for ObjectKey {
    fn from(info: &ObjectInfo) -> Self {
        Self::new(&info.originator, &info.name, &info.object_type)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.originator, self.name, self.object_type)
    }
}
