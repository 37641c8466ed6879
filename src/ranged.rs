//! Bounded, weakly-bound, recursively narrowable views onto an entropy
//! source. A `Ranged` never outlives its source: it holds a `Weak`
//! reference, so the source's destruction is a single act that severs
//! every outstanding view.

use std::sync::Weak;

use crate::entropy::EntropyCall;
use crate::error::CoreError;

/// A sub-range `[min, max]` (inclusive) of an entropy source's id space,
/// plus a weak handle on that source. Confinement is enforced on every
/// call: an index translating to an absolute id outside `[min, max]`
/// fails with [`CoreError::OutOfRange`] rather than silently clamping.
#[derive(Clone)]
pub struct Ranged<const S: usize> {
    source: Weak<dyn EntropyCall<S>>,
    min: u64,
    max: u64,
}

impl<const S: usize> Ranged<S> {
    pub(crate) fn from_weak(source: Weak<dyn EntropyCall<S>>, min: u64, max: u64) -> Self {
        Self { source, min, max }
    }

    /// Number of ids this view admits, i.e. `max - min + 1`.
    #[must_use]
    pub fn len(&self) -> u64 { self.max - self.min + 1 }

    /// A `Ranged` is never empty: `min <= max` is an invariant maintained
    /// by construction. Present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool { false }

    /// Derive the subkey at caller-local index `id`, i.e. at absolute id
    /// `id + min`.
    ///
    /// # Errors
    ///
    /// [`CoreError::OutOfRange`] if `id + min` exceeds `max` (or
    /// overflows); [`CoreError::Dangling`] if the source has been dropped.
    pub fn call(&self, id: u64) -> Result<[u8; S], CoreError> {
        let absolute = id
            .checked_add(self.min)
            .filter(|a| *a <= self.max)
            .ok_or(CoreError::OutOfRange { index: id, bound: self.max - self.min })?;
        let source = self.source.upgrade().ok_or(CoreError::Dangling)?;
        source.call(absolute)
    }

    /// Produce a sub-view over `[min + start, min + end]`. Narrowing
    /// composes: `r.narrow(a, b).narrow(c, d)` is equivalent to
    /// `r.narrow(a + c, a + d)`.
    ///
    /// # Errors
    ///
    /// [`CoreError::OutOfRange`] if `start >= end` or `end > max - min`.
    pub fn narrow(&self, start: u64, end: u64) -> Result<Self, CoreError> {
        let span = self.max - self.min;
        if start >= end || end > span {
            return Err(CoreError::OutOfRange { index: end, bound: span });
        }
        Ok(Self { source: self.source.clone(), min: self.min + start, max: self.min + end })
    }
}
