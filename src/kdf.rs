//! Hash/KDF provider: the one place that talks to an actual hash primitive.
//! Kept as a narrow, injectable capability (mirroring the redesign note that
//! replaced a compile-time template parameter with a runtime trait object)
//! so tests can swap in a double without touching anything above this file.

use crate::error::CoreError;

/// Maximum output length `blake2b_simd` (and the underlying BLAKE2b
/// primitive) supports for a single call.
pub const KDF_MAX: usize = 64;

/// Minimum entropy subkey size this library considers usable as key
/// material for a WOTS chain seed or salt.
pub const KDF_MIN: usize = 20;

/// The domain-separation context fixed for every derivation this library
/// performs. Subkeys derived under any other context are, by design,
/// unrelated values.
pub(crate) const CONTEXT: &[u8; 8] = b"CoinZdns";

/// A keyed derivation function plus a salted hash, the two primitives the
/// rest of this crate builds on. A private trait rather than a public one:
/// there is exactly one production implementation, and the indirection
/// exists so tests can substitute a recording or deterministic double.
pub(crate) trait HashProvider {
    /// Derive `out_len` bytes from `master_key`, `context`, and `subkey_id`.
    fn derive(
        &self, master_key: &[u8; 32], context: &[u8; 8], subkey_id: u64, out_len: usize,
    ) -> Result<Vec<u8>, CoreError>;

    /// Salted hash of a fixed-size input, producing `S` bytes of output.
    fn hash(&self, input: &[u8], salt: &[u8], out_len: usize) -> Result<Vec<u8>, CoreError>;
}

/// Production provider backed by `blake2b_simd`, chosen as the direct Rust
/// analogue of libsodium's `crypto_kdf_derive_from_key` /
/// `crypto_generichash` pairing (both BLAKE2b under the hood): the master
/// key becomes the BLAKE2b key, the subkey id becomes the salt parameter,
/// and the context becomes the personalization parameter, exactly as
/// libsodium's own `crypto_kdf` construction does internally.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Blake2bProvider;

impl HashProvider for Blake2bProvider {
    fn derive(
        &self, master_key: &[u8; 32], context: &[u8; 8], subkey_id: u64, out_len: usize,
    ) -> Result<Vec<u8>, CoreError> {
        if !(KDF_MIN..=KDF_MAX).contains(&out_len) {
            return Err(CoreError::DeriveError(subkey_id));
        }
        let mut salt = [0u8; 16];
        salt[..8].copy_from_slice(&subkey_id.to_le_bytes());
        let mut personal = [0u8; 16];
        personal[..8].copy_from_slice(context);
        let hash = blake2b_simd::Params::new()
            .hash_length(out_len)
            .key(master_key)
            .salt(&salt)
            .personal(&personal)
            .hash(&[]);
        Ok(hash.as_bytes().to_vec())
    }

    fn hash(&self, input: &[u8], salt: &[u8], out_len: usize) -> Result<Vec<u8>, CoreError> {
        if !(KDF_MIN..=KDF_MAX).contains(&out_len) || salt.len() > 64 {
            return Err(CoreError::HashError);
        }
        let hash = blake2b_simd::Params::new()
            .hash_length(out_len)
            .key(salt)
            .hash(input);
        Ok(hash.as_bytes().to_vec())
    }
}
