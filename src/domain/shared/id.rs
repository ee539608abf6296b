use serde::{Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// A typed identifier wrapping a [`Uuid`].
///
/// The phantom tag keeps ids of different entities from being mixed up at
/// compile time, while the persisted representation stays a plain uuid.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Id<T> {
    pub id: Uuid,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(id: Uuid) -> Self {
        Id { id, _marker: PhantomData }
    }

    pub fn new_one() -> Self {
        Id::new(Uuid::new_v4())
    }

    /// The all-zero uuid, reserved for "no identity" at the persistence edge.
    pub fn nil() -> Self {
        Id::new(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.id.is_nil()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> From<Id<T>> for Uuid {
    fn from(id_wrapper: Id<T>) -> Self {
        id_wrapper.id
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full_name = std::any::type_name::<T>();
        let clean_name = full_name.split("::").last().unwrap_or(full_name);
        let display_name = clean_name.replace("Tag", "Id");

        write!(f, "{}: {:?}", display_name, self.id)
    }
}

// Manual impl so the phantom tag does not need to be serializable itself.
impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.id.serialize(serializer)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct ResourceTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct AvailabilityTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct OwnerTag;

pub type ResourceId = Id<ResourceTag>;
pub type ResourceAvailabilityId = Id<AvailabilityTag>;
pub type OwnerId = Id<OwnerTag>;
