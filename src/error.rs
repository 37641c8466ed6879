//! Error taxonomy split along the construction/runtime boundary: invalid
//! parameters are rejected once, at construction, and never re-checked on
//! the hot derivation path.

use thiserror::Error;

/// Raised only while constructing a [`crate::Shape`], a
/// [`crate::WotsChainPair`], or a [`crate::FullKeyspace`]. A value of this
/// type means the combination of parameters can never be made to work,
/// independent of any particular master key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `D` (Winternitz depth bits) must be in `4..=16`.
    #[error("depth bits {0} out of range 4..=16")]
    DepthBitsOutOfRange(u8),
    /// `L` (digest length in bytes) must be in `16..=64`.
    #[error("digest length {0} out of range 16..=64")]
    DigestLengthOutOfRange(u8),
    /// A level height `H` must be in `3..=16`.
    #[error("level height {0} out of range 3..=16")]
    LevelHeightOutOfRange(u8),
    /// Entropy subkey size `S` must be in `20..=64`.
    #[error("subkey size {0} out of range 20..=64")]
    SubkeySizeOutOfRange(usize),
    /// A `coinzdensekey` needs at least two heights.
    #[error("a coinzdensekey shape needs at least 2 heights, got {0}")]
    TooFewHeights(usize),
    /// Total addressing bits for a shape exceeded the 64-bit subkey-id space.
    #[error("shape uses {0} bits of index space, which exceeds 64")]
    BitBudgetExceeded(u32),
    /// The bottom two heights alone exceeded the 48-bit sub-budget reserved
    /// for composability under an enclosing tree.
    #[error("bottom two levels use {0} bits of index space, which exceeds 48")]
    BottomBitBudgetExceeded(u32),
    /// `(D, L, C)` is not one of the nine fixed shapes `keyapi` supports.
    #[error("keyapi has no fixed shape for depthbits={d}, hashlen={l}, levelcount={c}")]
    UnsupportedKeyApiParams {
        /// The requested depth bits.
        d: u8,
        /// The requested digest length.
        l: u8,
        /// The requested level count.
        c: u8,
    },
}

/// Raised from runtime operations: deriving a subkey, narrowing a view, or
/// stepping a WOTS chain.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The underlying hash backend failed to initialize.
    #[error("entropy backend failed to initialize")]
    InitError,
    /// The keyed derivation reported invalid parameters for the requested
    /// output length. Should not occur for any `S` accepted by
    /// [`ConfigError::SubkeySizeOutOfRange`]'s validation.
    #[error("key derivation failed for subkey id {0}")]
    DeriveError(u64),
    /// The salted hash reported failure.
    #[error("salted hash step failed")]
    HashError,
    /// A `Ranged` call or narrow, or a WOTS chain index, fell outside its
    /// declared bounds. The only error callers are expected to routinely
    /// handle.
    #[error("index {index} out of range (bound is {bound})")]
    OutOfRange {
        /// The index that was requested.
        index: u64,
        /// The inclusive upper bound that rejected it.
        bound: u64,
    },
    /// A [`crate::Ranged`] view outlived the entropy source it was derived
    /// from.
    #[error("view's entropy source has been dropped")]
    Dangling,
}
