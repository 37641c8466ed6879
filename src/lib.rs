#![deny(clippy::pedantic, warnings, missing_docs, unsafe_code)]
// Most of the 'allow' category...
#![deny(absolute_paths_not_starting_with_crate, dead_code)]
#![deny(elided_lifetimes_in_paths, explicit_outlives_requirements, keyword_idents)]
#![deny(let_underscore_drop, macro_use_extern_crate, meta_variable_misuse, missing_abi)]
#![deny(non_ascii_idents, rust_2021_incompatible_closure_captures)]
#![deny(rust_2021_incompatible_or_patterns, rust_2021_prefixes_incompatible_syntax)]
#![deny(rust_2021_prelude_collisions, single_use_lifetimes, trivial_casts)]
#![deny(trivial_numeric_casts, unreachable_pub, unstable_features)]
#![deny(unused_extern_crates, unused_import_braces, unused_lifetimes, unused_macro_rules)]
#![deny(unused_qualifications, variant_size_differences)]

//! Index space allocation, entropy derivation, and the WOTS dual-chain
//! primitive underlying a CoinZdense hash-based one-time-signature key
//! forest.
//!
//! A CoinZdense key is a deterministic mapping from a single 32-byte
//! master key to an astronomically large space of Winternitz one-time
//! signing keys, organized as a multi-level Merkle forest. This crate
//! builds the three layers that mapping depends on:
//!
//! - [`make_secret_entropy`] and [`RootView`]: keyed derivation from a
//!   master key to an `S`-byte subkey, addressable by a `u64` id.
//! - [`Ranged`] and [`Shape`]: bounded views over that id space and the
//!   pure arithmetic that partitions it into salts, WOTS chain seeds,
//!   nonces, and recursive sub-trees.
//! - [`WotsChainPair`]: the dual forward/reverse hash chain that turns
//!   three entropy-derived seeds into a partial one-time signature.
//!
//! Merkle-tree construction over one-time keys, transaction signing and
//! verification, POLA delegation policy, and persistence are left to
//! layers built on top of this crate.

mod entropy;
mod error;
mod isa;
mod kdf;
mod keyspace;
mod ranged;
mod wots;

pub use entropy::{make_secret_entropy, RootView};
pub use error::{ConfigError, CoreError};
pub use isa::{chainset, keyapi_shape, levelkey, onetimekey, Nonce, Purpose, Shape};
pub use kdf::{KDF_MAX, KDF_MIN};
pub use keyspace::FullKeyspace;
pub use ranged::Ranged;
pub use wots::WotsChainPair;
