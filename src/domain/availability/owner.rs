use serde::Serialize;
use uuid::Uuid;

use crate::domain::shared::id::OwnerId;

/// The identity holding an atomic availability unit.
///
/// "Nobody holds this unit" is a first-class variant instead of a magic
/// sentinel value; the all-zero uuid only appears in the persisted shape and
/// is translated at the repository edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Owner {
    Unclaimed,
    OwnedBy(OwnerId),
}

impl Owner {
    pub fn new_one() -> Self {
        Owner::OwnedBy(OwnerId::new_one())
    }

    pub fn unclaimed() -> Self {
        Owner::Unclaimed
    }

    pub fn is_unclaimed(&self) -> bool {
        matches!(self, Owner::Unclaimed)
    }

    /// Translates the persisted `taken_by` column, where the all-zero uuid
    /// means unclaimed.
    pub fn from_persisted(taken_by: Uuid) -> Self {
        if taken_by.is_nil() { Owner::Unclaimed } else { Owner::OwnedBy(OwnerId::new(taken_by)) }
    }

    pub fn to_persisted(&self) -> Uuid {
        match self {
            Owner::Unclaimed => Uuid::nil(),
            Owner::OwnedBy(owner_id) => owner_id.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_round_trip_keeps_the_sentinel() {
        assert_eq!(Owner::from_persisted(Uuid::nil()), Owner::Unclaimed);

        let owner = Owner::new_one();
        assert_eq!(Owner::from_persisted(owner.to_persisted()), owner);
    }
}
