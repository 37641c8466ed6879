//! The WOTS dual-chain primitive: two salted hash chains, one run forward
//! from a signing index and one run in reverse, sharing a single salt.
//! Stopping either chain early to forge a signature at a smaller index
//! forces the other chain short of its required length, which the
//! verifier (outside this crate's scope) can detect.

use zeroize::Zeroize;

use crate::error::CoreError;
use crate::kdf::{Blake2bProvider, HashProvider};

/// A WOTS dual-chain instance bound to a depth `D` and an entropy-derived
/// seed pair plus salt. `S` is the subkey/seed byte width.
pub struct WotsChainPair<const S: usize> {
    up_seed: Seed<S>,
    down_seed: Seed<S>,
    salt: Seed<S>,
    n: u64,
    provider: Blake2bProvider,
}

#[derive(Zeroize)]
struct Seed<const S: usize>([u8; S]);

impl<const S: usize> WotsChainPair<S> {
    /// Build a chain pair for Winternitz depth bits `d` (chain length
    /// `n = 2^d`) from three entropy-derived seeds. Depth-bits validity is
    /// the responsibility of whichever [`crate::Shape`] produced `d`;
    /// this constructor is infallible.
    #[must_use]
    pub fn new(d: u8, up_seed: [u8; S], down_seed: [u8; S], salt: [u8; S]) -> Self {
        Self {
            up_seed: Seed(up_seed),
            down_seed: Seed(down_seed),
            salt: Seed(salt),
            n: 1u64 << d,
            provider: Blake2bProvider,
        }
    }

    /// Chain length `2^D`.
    #[must_use]
    pub fn n(&self) -> u64 { self.n }

    /// Step the dual chain to `index` and return `(up_half, down_half)`.
    ///
    /// `index == n` is the reserved "public key" request: both chains are
    /// driven through their full `n + 1` rounds. Any `index > n` is
    /// rejected.
    ///
    /// # Errors
    ///
    /// [`CoreError::OutOfRange`] if `index > n`; [`CoreError::HashError`]
    /// if a hash step fails.
    pub fn call(&self, index: u64) -> Result<([u8; S], [u8; S]), CoreError> {
        if index > self.n {
            return Err(CoreError::OutOfRange { index, bound: self.n });
        }
        let j = if index < self.n { self.n - index } else { index };
        let (m, big_m, tail_is_down) = if j > index { (index, j, true) } else { (j, index, false) };

        let mut up = self.up_seed.0;
        let mut down = self.down_seed.0;

        for _ in 0..m {
            up = self.step(&up)?;
            down = self.step(&down)?;
        }
        for _ in m..big_m {
            if tail_is_down {
                down = self.step(&down)?;
            } else {
                up = self.step(&up)?;
            }
        }
        up = self.step(&up)?;
        down = self.step(&down)?;

        Ok((up, down))
    }

    fn step(&self, chain: &[u8; S]) -> Result<[u8; S], CoreError> {
        let out = self.provider.hash(chain, &self.salt.0, S).map_err(|_| CoreError::HashError)?;
        let mut result = [0u8; S];
        result.copy_from_slice(&out);
        Ok(result)
    }
}
