//! Index space allocation: purely arithmetic mapping from a logical
//! coordinate (a chain purpose, a one-time-key slot, a leaf index) to an
//! absolute `u64` subkey id. No hashing, no allocation beyond `Shape`
//! construction happens here.
//!
//! The original source encodes `(D, L, H1, .., Hn)` as a template parameter
//! pack, giving every size/index function as a compile-time constant. Rust
//! const generics cannot express a variadic height pack, so this is
//! lowered to a runtime [`Shape`] descriptor computed once at construction;
//! every function below is a pure function of `(d, l, heights, coord)`.

use crate::error::ConfigError;

/// Which seed or salt within a [`chainset`] a caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    /// The forward ("up") chain seed.
    Up = 0,
    /// The reverse ("down") chain seed.
    Down = 1,
    /// The salt shared by both chains.
    Salt = 2,
}

/// One WOTS dual chain: an up-seed, a down-seed, and a shared salt. The
/// size of the index space a single chainset occupies is always three.
pub mod chainset {
    use super::Purpose;

    /// Index space occupied by one chainset.
    #[must_use]
    pub const fn size() -> u64 { 3 }

    /// Absolute index of `purpose` within the chainset based at `base`.
    #[must_use]
    pub const fn index(base: u64, purpose: Purpose) -> u64 { base + purpose as u64 }
}

/// Which nonce slot at the base of a [`onetimekey`] a caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nonce {
    /// Nonce used to sign a transaction digest.
    Transaction = 0,
    /// Nonce used to sign a POLA delegation sub-signature.
    PolaSubSig = 1,
}

fn validate_depth_bits(d: u8) -> Result<(), ConfigError> {
    if (4..=16).contains(&d) { Ok(()) } else { Err(ConfigError::DepthBitsOutOfRange(d)) }
}

fn validate_digest_length(l: u8) -> Result<(), ConfigError> {
    if (16..=64).contains(&l) { Ok(()) } else { Err(ConfigError::DigestLengthOutOfRange(l)) }
}

fn validate_level_height(h: u8) -> Result<(), ConfigError> {
    if (3..=16).contains(&h) { Ok(()) } else { Err(ConfigError::LevelHeightOutOfRange(h)) }
}

/// A set of chainsets sufficient to sign one `L`-byte digest with `D`
/// Winternitz depth bits, preceded by two reserved nonce slots.
pub mod onetimekey {
    use super::{chainset, Nonce};

    /// Number of chainsets needed to cover an `L`-byte digest at depth `D`.
    #[must_use]
    pub const fn chain_count(d: u8, l: u8) -> u64 { (u64::from(l) * 8 - 1) / u64::from(d) + 1 }

    /// Absolute index of one of the two nonce slots at `base`.
    #[must_use]
    pub const fn nonceindex(base: u64, nonce: Nonce) -> u64 { base + nonce as u64 }

    /// Absolute index of chainset slot `k` (already scaled by the caller:
    /// `k = chainset_number * chainset::size() + purpose`). Matches the
    /// original source literally — `index` itself never multiplies by
    /// `chainset::size()`.
    #[must_use]
    pub const fn index(base: u64, k: u64) -> u64 { base + 2 + k }

    /// Index space occupied by a single one-time key.
    #[must_use]
    pub const fn size(d: u8, l: u8) -> u64 { chain_count(d, l) * chainset::size() }

    /// `floor(log2(size)) + 1`, used in bit-budget assertions.
    #[must_use]
    pub fn bits(d: u8, l: u8) -> u32 { 64 - (size(d, l)).leading_zeros() }
}

/// A Merkle tree over `2^H` one-time keys, with a dedicated salt slot at
/// its base. An exhaustible resource: each of the `2^H` leaves can sign
/// exactly once.
pub mod levelkey {
    use super::onetimekey;

    /// The index reserved for the tree's salt.
    #[must_use]
    pub const fn saltindex(base: u64) -> u64 { base }

    /// Absolute base index of the `i`-th one-time key, `i` in `[0, 2^H)`.
    #[must_use]
    pub const fn index(d: u8, l: u8, base: u64, i: u64) -> u64 {
        base + i * onetimekey::size(d, l) + 1
    }

    /// Index space occupied by this level key and all its one-time keys.
    #[must_use]
    pub const fn size(d: u8, l: u8, h: u8) -> u64 { 1 + (1u64 << h) * onetimekey::size(d, l) }

    /// Number of one-time keys (signing items) this level key holds.
    #[must_use]
    pub const fn items(h: u8) -> u64 { 1u64 << h }

    /// Total addressing bits this level key consumes.
    #[must_use]
    pub fn bits(d: u8, l: u8, h: u8) -> u32 { u32::from(h) + onetimekey::bits(d, l) }
}

fn coinzdensekey_rest_size(d: u8, l: u8, rest: &[u8]) -> u64 {
    if rest.len() == 1 { levelkey::size(d, l, rest[0]) } else { coinzdensekey_size(d, l, rest) }
}

fn coinzdensekey_rest_items(rest: &[u8]) -> u64 {
    if rest.len() == 1 { levelkey::items(rest[0]) } else { coinzdensekey_items(rest) }
}

fn coinzdensekey_rest_bits(d: u8, l: u8, rest: &[u8]) -> u32 {
    if rest.len() == 1 { levelkey::bits(d, l, rest[0]) } else { coinzdensekey_bits(d, l, rest) }
}

fn coinzdensekey_rest_index(d: u8, l: u8, rest: &[u8], base: u64, leaf: u64) -> u64 {
    if rest.len() == 1 {
        levelkey::index(d, l, base, leaf)
    } else {
        coinzdensekey_index(d, l, rest, base, leaf)
    }
}

/// Total index space occupied by a `coinzdensekey<D, L, heights...>` tree,
/// `heights.len() >= 2`.
#[must_use]
pub(crate) fn coinzdensekey_size(d: u8, l: u8, heights: &[u8]) -> u64 {
    let h1 = heights[0];
    let rest = &heights[1..];
    levelkey::size(d, l, h1) + levelkey::items(h1) * coinzdensekey_rest_size(d, l, rest)
}

/// Number of leaf one-time keys a `coinzdensekey<D, L, heights...>` tree
/// can sign.
#[must_use]
pub(crate) fn coinzdensekey_items(heights: &[u8]) -> u64 {
    let h1 = heights[0];
    let rest = &heights[1..];
    levelkey::items(h1) * coinzdensekey_rest_items(rest)
}

/// Total addressing bits a `coinzdensekey<D, L, heights...>` tree consumes.
#[must_use]
pub(crate) fn coinzdensekey_bits(d: u8, l: u8, heights: &[u8]) -> u32 {
    let h1 = heights[0];
    let rest = &heights[1..];
    levelkey::bits(d, l, h1) + coinzdensekey_rest_bits(d, l, rest)
}

/// Absolute index of leaf one-time key `leaf` in a
/// `coinzdensekey<D, L, heights...>` tree based at `base`.
///
/// The nested call always passes `0`, not `base`, for the remainder of the
/// tree below the top level — `base` is added exactly once, here, so a
/// sub-tree composes the same way whether it is the top of the forest or
/// mounted under an enclosing level.
#[must_use]
pub(crate) fn coinzdensekey_index(d: u8, l: u8, heights: &[u8], base: u64, leaf: u64) -> u64 {
    let h1 = heights[0];
    let rest = &heights[1..];
    let rest_items = coinzdensekey_rest_items(rest);
    let rest_size = coinzdensekey_rest_size(d, l, rest);
    let q = leaf / rest_items;
    let r = leaf % rest_items;
    base + levelkey::size(d, l, h1) + rest_size * q + coinzdensekey_rest_index(d, l, rest, 0, r)
}

/// Validated, immutable description of a `coinzdensekey` shape: the
/// Winternitz depth bits `D`, the digest length `L`, and the sequence of
/// level heights from the top of the forest down to the leaves.
///
/// Replaces the original's compile-time template parameter pack; all the
/// invariant checks a template instantiation would perform via
/// `static_assert` happen once, here, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    d: u8,
    l: u8,
    heights: Vec<u8>,
}

impl Shape {
    /// Validate and construct a shape.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invariant that fails:
    /// `D`, `L`, or any height out of its legal range; fewer than two
    /// heights; or the addressing-bit budget (64 bits total, 48 bits for
    /// the bottom two levels) exceeded.
    pub fn new(d: u8, l: u8, heights: Vec<u8>) -> Result<Self, ConfigError> {
        validate_depth_bits(d)?;
        validate_digest_length(l)?;
        if heights.len() < 2 {
            return Err(ConfigError::TooFewHeights(heights.len()));
        }
        for &h in &heights {
            validate_level_height(h)?;
        }
        let bottom_two = &heights[heights.len() - 2..];
        let bottom_bits = levelkey::bits(d, l, bottom_two[0]) + levelkey::bits(d, l, bottom_two[1]);
        if bottom_bits > 48 {
            return Err(ConfigError::BottomBitBudgetExceeded(bottom_bits));
        }
        let total_bits = coinzdensekey_bits(d, l, &heights);
        if total_bits > 64 {
            return Err(ConfigError::BitBudgetExceeded(total_bits));
        }
        Ok(Self { d, l, heights })
    }

    /// Winternitz depth bits.
    #[must_use]
    pub fn d(&self) -> u8 { self.d }

    /// Digest length in bytes.
    #[must_use]
    pub fn l(&self) -> u8 { self.l }

    /// Level heights, top of the forest first.
    #[must_use]
    pub fn heights(&self) -> &[u8] { &self.heights }

    /// Total index space this shape occupies.
    #[must_use]
    pub fn size(&self) -> u64 { coinzdensekey_size(self.d, self.l, &self.heights) }

    /// Number of leaf one-time keys this shape can sign.
    #[must_use]
    pub fn items(&self) -> u64 { coinzdensekey_items(&self.heights) }

    /// Total addressing bits this shape consumes.
    #[must_use]
    pub fn bits(&self) -> u32 { coinzdensekey_bits(self.d, self.l, &self.heights) }

    /// Absolute index of leaf one-time key `leaf`, based at `base`.
    #[must_use]
    pub fn index(&self, base: u64, leaf: u64) -> u64 {
        coinzdensekey_index(self.d, self.l, &self.heights, base, leaf)
    }

    /// Size of this shape's own top level key (`levelkey<D,L,H1>`), used to
    /// delimit the `l0` sub-view of a keyspace.
    #[must_use]
    pub fn l0_size(&self) -> u64 { levelkey::size(self.d, self.l, self.heights[0]) }
}

/// Selects one of nine fixed `coinzdensekey` shapes for `(D, L, C)`, the
/// finite parameter set used by bindings that cannot compile an arbitrary
/// template instantiation per shape.
///
/// # Errors
///
/// [`ConfigError::UnsupportedKeyApiParams`] if `(D, L, C)` is not one of
/// the fixed combinations, or a [`ConfigError`] from [`Shape::new`] if the
/// resolved shape somehow violates the bit budget.
pub fn keyapi_shape(d: u8, l: u8, c: u8) -> Result<Shape, ConfigError> {
    if !(d == 8 || d == 12 || d == 16) || !(l == 16 || l == 24 || l == 32) || !(4..=6).contains(&c)
    {
        return Err(ConfigError::UnsupportedKeyApiParams { d, l, c });
    }
    let class = match onetimekey::bits(d, l) {
        5 => 1,
        6 => 2,
        _ => 3,
    };
    let heights: &[u8] = match (c, class) {
        (4, 1) => &[11, 11, 11, 10],
        (4, 2) => &[11, 11, 10, 10],
        (4, _) => &[11, 10, 10, 10],
        (5, 1) => &[9, 9, 9, 8, 8],
        (5, 2) => &[9, 9, 8, 8, 8],
        (5, _) => &[9, 8, 8, 8, 8],
        (6, 1) => &[8, 7, 7, 7, 7, 7],
        (6, 2) => &[7, 7, 7, 7, 7, 7],
        (6, _) => &[7, 7, 7, 7, 7, 6],
        _ => unreachable!("c validated to 4..=6 above"),
    };
    Shape::new(d, l, heights.to_vec())
}


#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn chainset_indices_disjoint() {
        assert_eq!(chainset::index(100, Purpose::Up), 100);
        assert_eq!(chainset::index(100, Purpose::Down), 101);
        assert_eq!(chainset::index(100, Purpose::Salt), 102);
    }

    #[test]
    fn onetimekey_size_matches_formula() {
        // D=6, L=16: chains = floor((128-1)/6)+1 = 21+1 = 22; size = 66
        assert_eq!(onetimekey::size(6, 16), 66);
    }

    #[test]
    fn levelkey_size_and_items() {
        // D=6, L=16, H=6: size = 1 + 64*66 = 4225
        assert_eq!(levelkey::size(6, 16, 6), 4225);
        assert_eq!(levelkey::items(6), 64);
    }

    #[test]
    fn scenario_s4_and_s5_mainkey_and_l0_bounds() {
        let shape = Shape::new(6, 16, vec![6, 6, 6]).unwrap();
        // mainkey size per the scenario's literal figure
        assert_eq!(shape.size(), 17_580_225);
        assert_eq!(shape.l0_size(), 4225);
    }

    #[test]
    fn keyapi_shapes_all_validate() {
        for &d in &[8u8, 12, 16] {
            for &l in &[16u8, 24, 32] {
                for &c in &[4u8, 5, 6] {
                    let shape = keyapi_shape(d, l, c).unwrap();
                    assert!(shape.bits() <= 64);
                }
            }
        }
    }

    #[test]
    fn shape_rejects_oversize_budget() {
        // H values that blow the 48-bit bottom budget.
        let err = Shape::new(16, 64, vec![16, 16]).unwrap_err();
        assert!(matches!(err, ConfigError::BottomBitBudgetExceeded(_)));
    }

    #[test]
    fn shape_rejects_bad_depth_bits() {
        assert_eq!(Shape::new(3, 16, vec![6, 6]).unwrap_err(), ConfigError::DepthBitsOutOfRange(3));
    }

    #[test]
    fn scenario_s6_deep_shape_items_and_index_are_bit_exact() {
        // coinzdensekey<12,16,9,9,9,8>: items = 2^35, index(0,0) = 50692.
        // Both figures hand-derived from the §4.3 formulas (chain_count=11,
        // onetimekey::size=33, onetimekey::bits=6, levelkey::size(9)=16897,
        // levelkey::size(8)=8449) and cross-checked two independent ways.
        let shape = Shape::new(12, 16, vec![9, 9, 9, 8]).unwrap();
        assert_eq!(shape.items(), 1u64 << 35);
        assert_eq!(shape.index(0, 0), 50_692);
    }

    fn insert_chain_ids(ids: &mut HashSet<u64>, d: u8, l: u8, otk_base: u64) {
        for k in 0..onetimekey::size(d, l) {
            assert!(ids.insert(onetimekey::index(otk_base, k)));
        }
    }

    /// Enumerates every chainset purpose (up/down/salt) of every one-time
    /// key at every level of a small two-height shape, plus each level's
    /// own salt slot, and checks the whole set is pairwise distinct and
    /// exactly fills `[0, shape.size())` with no gaps.
    #[test]
    fn property5_chainset_purposes_are_pairwise_disjoint_across_whole_shape() {
        let (d, l) = (4u8, 16u8);
        let shape = Shape::new(d, l, vec![3, 3]).unwrap();
        let top_items = levelkey::items(3);
        let top_size = levelkey::size(d, l, 3);

        let mut ids = HashSet::new();
        assert!(ids.insert(levelkey::saltindex(0)));
        for i in 0..top_items {
            insert_chain_ids(&mut ids, d, l, levelkey::index(d, l, 0, i));
        }
        for q in 0..top_items {
            let sub_base = top_size + top_size * q;
            assert!(ids.insert(levelkey::saltindex(sub_base)));
            for r in 0..top_items {
                insert_chain_ids(&mut ids, d, l, levelkey::index(d, l, sub_base, r));
            }
        }

        assert_eq!(ids.len() as u64, shape.size());
        assert!(ids.iter().all(|&id| id < shape.size()));
    }

    #[test]
    fn property6_size_equals_last_coordinate_index_plus_unit_span() {
        let (d, l) = (4u8, 16u8);
        let otk_size = onetimekey::size(d, l);

        let h = 3u8;
        let last = levelkey::items(h) - 1;
        assert_eq!(levelkey::size(d, l, h), levelkey::index(d, l, 0, last) + otk_size);

        let shape = Shape::new(d, l, vec![3, 3]).unwrap();
        let last_leaf = shape.items() - 1;
        assert_eq!(shape.size(), shape.index(0, last_leaf) + otk_size);
    }
}
