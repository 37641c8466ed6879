//! Binds an entropy source to a validated [`Shape`], exposing the three
//! named, non-overlapping sub-views a signing layer needs: the main key
//! tree, its level-0 prefix, and everything above the tree (reserved for
//! future growth or an enclosing forest).

use crate::entropy::RootView;
use crate::error::CoreError;
use crate::isa::Shape;
use crate::ranged::Ranged;

/// An entropy source bound to a particular `coinzdensekey` shape.
pub struct FullKeyspace<const S: usize> {
    shape: Shape,
    root: Ranged<S>,
}

impl<const S: usize> FullKeyspace<S> {
    /// Bind `root`'s id space to `shape`.
    #[must_use]
    pub fn new(root: &RootView<S>, shape: Shape) -> Self {
        Self { shape, root: root.as_ranged() }
    }

    /// The shape this keyspace was bound to.
    #[must_use]
    pub fn shape(&self) -> &Shape { &self.shape }

    /// View over `[0, shape.size() - 1]`, the main `coinzdensekey` tree.
    ///
    /// # Errors
    ///
    /// [`CoreError::Dangling`] if the entropy source has been dropped.
    pub fn mainkey_keyspace(&self) -> Result<Ranged<S>, CoreError> {
        self.root.narrow(0, self.shape.size() - 1)
    }

    /// View over `[shape.size(), u64::MAX]`, everything above the tree.
    ///
    /// # Errors
    ///
    /// [`CoreError::Dangling`] if the entropy source has been dropped.
    pub fn unallocated_keyspace(&self) -> Result<Ranged<S>, CoreError> {
        self.root.narrow(self.shape.size(), u64::MAX)
    }

    /// View over `[0, levelkey<D,L,H1>::size() - 1]`, a strict prefix of
    /// `mainkey` covering only the top level key.
    ///
    /// # Errors
    ///
    /// [`CoreError::Dangling`] if the entropy source has been dropped.
    pub fn l0_keyspace(&self) -> Result<Ranged<S>, CoreError> {
        self.root.narrow(0, self.shape.l0_size() - 1)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::make_secret_entropy;

    #[test]
    fn scenario_s4_s5_bounds() {
        let shape = Shape::new(6, 16, vec![6, 6, 6]).unwrap();
        let root = make_secret_entropy::<20>([5u8; 32]).unwrap();
        let keyspace = FullKeyspace::new(&root, shape);

        let mainkey = keyspace.mainkey_keyspace().unwrap();
        assert!(mainkey.call(123_456).is_ok());
        assert!(mainkey.call(17_600_000).is_err());

        let l0 = keyspace.l0_keyspace().unwrap();
        assert!(l0.call(4224).is_ok());
        assert!(l0.call(5000).is_err());
    }

    #[test]
    fn mainkey_and_unallocated_are_disjoint() {
        let shape = Shape::new(6, 16, vec![6, 6, 6]).unwrap();
        let root = make_secret_entropy::<20>([5u8; 32]).unwrap();
        let keyspace = FullKeyspace::new(&root, shape);
        let unallocated = keyspace.unallocated_keyspace().unwrap();
        assert!(unallocated.call(0).is_ok());
        assert_eq!(unallocated.call(0).unwrap(), root.call(17_580_225).unwrap());
    }
}
