//! Keyed buffer transform using ChaCha20-Poly1305
//!
//! Each dissipation round derives a fresh key from the field id and the
//! round index, then encrypts the field buffer chunk by chunk, copying
//! ciphertext back in place. The transform is not meant to be reversible;
//! its purpose is to burn cycles proportional to buffer size and to
//! produce a deterministic-per-round variation factor for the energy
//! decay.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use sha2::{Digest, Sha256};

use fissim_core::{FieldId, FissionError, FissionResult};

/// Key size for ChaCha20-Poly1305
pub const KEY_SIZE: usize = 32;

/// Nonce size for ChaCha20-Poly1305
pub const NONCE_SIZE: usize = 12;

/// Buffer bytes processed per cipher invocation
pub const CHUNK_SIZE: usize = 1024;

/// Round tag reserved for the seeding pass at field creation
pub const SEED_ROUND: u32 = u32::MAX;

/// Derive the round key from the field id and round index
pub fn round_key(field_id: FieldId, round: u32) -> [u8; KEY_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update(field_id.to_bytes());
    hasher.update(round.to_le_bytes());
    hasher.finalize().into()
}

/// Derive the round nonce; unique per (field, round) pair
pub fn derive_nonce(field_id: FieldId, round: u32) -> [u8; NONCE_SIZE] {
    let mut nonce = [0u8; NONCE_SIZE];
    nonce[0..8].copy_from_slice(&field_id.to_bytes());
    nonce[8..12].copy_from_slice(&round.to_le_bytes());
    nonce
}

/// One round's cipher, bound to a field and round index
pub struct FieldCipher {
    cipher: ChaCha20Poly1305,
    nonce: [u8; NONCE_SIZE],
    field_id: FieldId,
}

impl FieldCipher {
    /// Cipher for the given field and round
    pub fn for_round(field_id: FieldId, round: u32) -> Self {
        let key = round_key(field_id, round);
        // Sha256 output is always KEY_SIZE bytes
        let cipher = ChaCha20Poly1305::new_from_slice(&key).expect("Invalid key size");
        FieldCipher {
            cipher,
            nonce: derive_nonce(field_id, round),
            field_id,
        }
    }

    /// Transform the buffer in place, chunk by chunk
    ///
    /// Returns the round's variation factor in [0.5, 1.5], derived from
    /// the first ciphertext bytes. An empty buffer is a valid degenerate
    /// case and yields a neutral factor of 1.0.
    pub fn transform(&self, buffer: &mut [u8]) -> FissionResult<f64> {
        let nonce = Nonce::from_slice(&self.nonce);
        let mut variation = 1.0;

        for (i, chunk) in buffer.chunks_mut(CHUNK_SIZE).enumerate() {
            let ciphertext = self
                .cipher
                .encrypt(nonce, &*chunk)
                .map_err(|_| FissionError::TransformFailed(self.field_id.0))?;
            if i == 0 && ciphertext.len() >= 4 {
                let mut first = [0u8; 4];
                first.copy_from_slice(&ciphertext[..4]);
                variation = 0.5 + u32::from_le_bytes(first) as f64 / u32::MAX as f64;
            }
            chunk.copy_from_slice(&ciphertext[..chunk.len()]);
        }

        Ok(variation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_differs_per_round() {
        let id = FieldId::new(7);
        assert_ne!(round_key(id, 0), round_key(id, 1));
        assert_ne!(round_key(id, 0), round_key(FieldId::new(8), 0));
    }

    #[test]
    fn test_nonce_uniqueness() {
        let n1 = derive_nonce(FieldId::new(1), 0);
        let n2 = derive_nonce(FieldId::new(1), 1);
        let n3 = derive_nonce(FieldId::new(2), 0);
        assert_ne!(n1, n2);
        assert_ne!(n1, n3);
    }

    #[test]
    fn test_transform_changes_buffer() {
        let mut buffer = vec![0u8; 4096];
        let before = buffer.clone();
        FieldCipher::for_round(FieldId::new(1), 0)
            .transform(&mut buffer)
            .unwrap();
        assert_ne!(buffer, before);
    }

    #[test]
    fn test_transform_deterministic() {
        let mut a = vec![0u8; 2048];
        let mut b = vec![0u8; 2048];
        let va = FieldCipher::for_round(FieldId::new(1), 3)
            .transform(&mut a)
            .unwrap();
        let vb = FieldCipher::for_round(FieldId::new(1), 3)
            .transform(&mut b)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(va, vb);
    }

    #[test]
    fn test_variation_in_range() {
        for round in 0..32 {
            let mut buffer = vec![0u8; 1024];
            let v = FieldCipher::for_round(FieldId::new(9), round)
                .transform(&mut buffer)
                .unwrap();
            assert!((0.5..=1.5).contains(&v), "variation {v}");
        }
    }

    #[test]
    fn test_empty_buffer_neutral_variation() {
        let mut buffer = Vec::new();
        let v = FieldCipher::for_round(FieldId::new(1), 0)
            .transform(&mut buffer)
            .unwrap();
        assert_eq!(v, 1.0);
    }

    #[test]
    fn test_partial_chunk_transformed() {
        let mut buffer = vec![0u8; 1500];
        let before = buffer.clone();
        FieldCipher::for_round(FieldId::new(2), 0)
            .transform(&mut buffer)
            .unwrap();
        assert_eq!(buffer.len(), 1500);
        assert_ne!(&buffer[1024..], &before[1024..]);
    }
}
