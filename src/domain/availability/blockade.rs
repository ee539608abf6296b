use serde::Serialize;

use crate::domain::availability::owner::Owner;

/// Who holds one atomic unit and whether the unit is administratively
/// disabled.
///
/// Invariant: `disabled == true` implies `taken_by` is the owner that
/// disabled the unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Blockade {
    taken_by: Owner,
    disabled: bool,
}

impl Blockade {
    pub fn none() -> Self {
        Blockade { taken_by: Owner::Unclaimed, disabled: false }
    }

    pub fn owned_by(owner: Owner) -> Self {
        Blockade { taken_by: owner, disabled: false }
    }

    pub fn disabled_by(owner: Owner) -> Self {
        Blockade { taken_by: owner, disabled: true }
    }

    pub fn taken_by(&self) -> Owner {
        self.taken_by
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn can_be_taken_by(&self, requester: Owner) -> bool {
        self.taken_by == requester || self.taken_by.is_unclaimed()
    }

    pub fn is_disabled_by(&self, owner: Owner) -> bool {
        self.disabled && self.taken_by == owner
    }

    /// A unit is available for a requester iff it is unclaimed or already
    /// held by that requester, and not disabled.
    pub fn is_available_for(&self, requester: Owner) -> bool {
        self.can_be_taken_by(requester) && !self.disabled
    }
}
