//! Typed Ids

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::cart::CartLineItem;

/// Numeric backend identifier tagged with the entity it identifies.
pub struct TypedId<T>(u64, PhantomData<T>);

impl<T> TypedId<T> {
    /// Wrap a raw backend id.
    pub const fn new(id: u64) -> Self {
        Self(id, PhantomData)
    }

    /// Return the raw backend id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Product marker
#[derive(Debug)]
pub struct Product;

/// User marker
#[derive(Debug)]
pub struct User;

/// Color variant marker
#[derive(Debug)]
pub struct Color;

/// Size variant marker
#[derive(Debug)]
pub struct Size;

/// Cart line item id; stable across pages.
pub type LineItemId = TypedId<CartLineItem>;

/// Product id
pub type ProductId = TypedId<Product>;

/// User id
pub type UserId = TypedId<User>;

/// Color variant id
pub type ColorId = TypedId<Color>;

/// Size variant id
pub type SizeId = TypedId<Size>;

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedId<T> {}

impl<T> Debug for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedId<T> {}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for TypedId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> From<u64> for TypedId<T> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<T> From<TypedId<T>> for u64 {
    fn from(value: TypedId<T>) -> Self {
        value.get()
    }
}

impl<T> Serialize for TypedId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de, T> Deserialize<'de> for TypedId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::new)
    }
}
