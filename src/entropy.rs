//! Deterministic subkey derivation: wraps a [`HashProvider`] and a master
//! key, fixes the domain-separation context, and vends `S`-byte subkeys
//! addressable by a `u64` id.

use std::sync::Arc;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{ConfigError, CoreError};
use crate::kdf::{Blake2bProvider, HashProvider, CONTEXT, KDF_MAX, KDF_MIN};
use crate::ranged::Ranged;

/// Anything that can answer "give me the `S`-byte subkey at this absolute
/// id" is an entropy source. A private trait: the only production
/// implementor is [`SecretEntropy`], but tests may substitute a recording
/// or identity double without the rest of the crate noticing.
pub(crate) trait EntropyCall<const S: usize>: Send + Sync {
    fn call(&self, id: u64) -> Result<[u8; S], CoreError>;
}

/// Owns a master key and derives subkeys from it. Never exposes the key
/// itself: there is no accessor, and `Debug` is intentionally not derived.
struct SecretEntropy<const S: usize, P: HashProvider = Blake2bProvider> {
    master_key: MasterKey,
    provider: P,
}

/// The 32-byte secret every subkey in the forest is ultimately derived
/// from. Zeroized on drop; never serialized, never logged, never returned
/// to a caller.
#[derive(Zeroize, ZeroizeOnDrop)]
struct MasterKey([u8; 32]);

impl<const S: usize, P: HashProvider> EntropyCall<S> for SecretEntropy<S, P> {
    fn call(&self, id: u64) -> Result<[u8; S], CoreError> {
        let bytes = self.provider.derive(&self.master_key.0, CONTEXT, id, S)?;
        let mut out = [0u8; S];
        out.copy_from_slice(&bytes);
        Ok(out)
    }
}

/// The owning handle on an entropy source: a `Ranged` view over the entire
/// `u64` id space, and the sole strong reference keeping the underlying
/// secret alive. Dropping a `RootView` invalidates every `Ranged` narrowed
/// from it; subsequent use of those views fails with
/// [`CoreError::Dangling`].
pub struct RootView<const S: usize> {
    inner: Arc<dyn EntropyCall<S>>,
}

impl<const S: usize> RootView<S> {
    /// Derive the subkey at the given absolute id.
    ///
    /// # Errors
    ///
    /// [`CoreError::DeriveError`] if the underlying KDF rejects the
    /// requested output length (should not occur for any `S` this crate's
    /// [`crate::Shape`] validation accepts).
    pub fn call(&self, id: u64) -> Result<[u8; S], CoreError> { self.inner.call(id) }

    /// Produce a bounded view over `[start, end]` of this root's id space.
    ///
    /// # Errors
    ///
    /// [`CoreError::OutOfRange`] if `start >= end` or `end > u64::MAX`.
    pub fn narrow(&self, start: u64, end: u64) -> Result<Ranged<S>, CoreError> {
        self.as_ranged().narrow(start, end)
    }

    /// A weakly-bound `Ranged` view over the full `[0, u64::MAX]` range.
    #[must_use]
    pub fn as_ranged(&self) -> Ranged<S> {
        Ranged::from_weak(Arc::downgrade(&self.inner), 0, u64::MAX)
    }
}

/// Initialize an entropy source from a 32-byte master key, using the
/// production BLAKE2b-backed provider.
///
/// `S`, the subkey width every derived value will have, is checked once
/// here rather than deferred to the first failing [`RootView::call`]: the
/// underlying KDF can only produce between [`KDF_MIN`] and [`KDF_MAX`]
/// bytes per call, so any shape requesting an `S` outside that range can
/// never work, independent of the master key.
///
/// # Errors
///
/// Returns [`ConfigError::SubkeySizeOutOfRange`] if `S` is outside
/// `KDF_MIN..=KDF_MAX`.
pub fn make_secret_entropy<const S: usize>(
    master_key: [u8; 32],
) -> Result<RootView<S>, ConfigError> {
    if !(KDF_MIN..=KDF_MAX).contains(&S) {
        return Err(ConfigError::SubkeySizeOutOfRange(S));
    }
    let entropy = SecretEntropy::<S> { master_key: MasterKey(master_key), provider: Blake2bProvider };
    Ok(RootView { inner: Arc::new(entropy) })
}
