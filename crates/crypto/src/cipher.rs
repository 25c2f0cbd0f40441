//! Sponge-based authenticated stream cipher.
//!
//! The sponge is keyed with `[K.x, K.y]` and doubles as keystream generator
//! and MAC. Chunk `i` is encrypted as `m[i] + ks[i]` (field addition). Chunks
//! are fed back pairwise: after producing an odd-indexed chunk, both it and
//! its predecessor are absorbed, and a trailing even-indexed last chunk is
//! absorbed alone. One final squeeze yields the authentication tag, appended
//! as the last ciphertext element.
//!
//! Decryption must replay exactly this schedule; any divergence shows up as
//! an authentication failure and no plaintext is released.
//!
//! # Keystream reuse
//!
//! Encrypting two messages under the same key without a nonce reuses the
//! keystream, and because chunks are combined additively `c - c'` reveals
//! `m - m'`. Treat a `(tag, owner secret)` pair as single-use for
//! [`SpongeCipher::encrypt`], or use the `*_with_nonce` variants which absorb
//! a caller-chosen unique nonce after the key.

use tracing::{debug, warn};

use crate::algebra::FieldElement;
use crate::commitment::SymmetricKey;
use crate::error::{PreError, PreResult};
use crate::poseidon::PoseidonSponge;

/// Keyed sponge stream cipher with a trailing authentication tag.
#[derive(Debug, Clone, Copy)]
pub struct SpongeCipher<'a> {
    key: &'a SymmetricKey,
}

impl<'a> SpongeCipher<'a> {
    pub fn new(key: &'a SymmetricKey) -> Self {
        Self { key }
    }

    fn keyed_sponge(&self, nonce: Option<FieldElement>) -> PreResult<PoseidonSponge> {
        let mut sponge = PoseidonSponge::new()?;
        sponge.absorb_all(&self.key.key_fields());
        if let Some(nonce) = nonce {
            sponge.absorb(nonce);
        }
        Ok(sponge)
    }

    /// First keystream element, used for single-leaf log entries.
    pub fn keystream_element(&self) -> PreResult<FieldElement> {
        Ok(self.keyed_sponge(None)?.squeeze())
    }

    pub fn encrypt(&self, plaintext: &[FieldElement]) -> PreResult<Vec<FieldElement>> {
        self.seal(None, plaintext)
    }

    pub fn decrypt(&self, ciphertext: &[FieldElement]) -> PreResult<Vec<FieldElement>> {
        self.open(None, ciphertext)
    }

    pub fn encrypt_with_nonce(
        &self,
        nonce: FieldElement,
        plaintext: &[FieldElement],
    ) -> PreResult<Vec<FieldElement>> {
        self.seal(Some(nonce), plaintext)
    }

    pub fn decrypt_with_nonce(
        &self,
        nonce: FieldElement,
        ciphertext: &[FieldElement],
    ) -> PreResult<Vec<FieldElement>> {
        self.open(Some(nonce), ciphertext)
    }

    fn seal(
        &self,
        nonce: Option<FieldElement>,
        plaintext: &[FieldElement],
    ) -> PreResult<Vec<FieldElement>> {
        if plaintext.is_empty() {
            return Err(PreError::EmptyPlaintext);
        }
        let mut sponge = self.keyed_sponge(nonce)?;
        let last = plaintext.len() - 1;
        let mut ciphertext = Vec::with_capacity(plaintext.len() + 1);

        for (i, chunk) in plaintext.iter().enumerate() {
            let keystream = sponge.squeeze();
            ciphertext.push(*chunk + keystream);
            absorb_schedule(&mut sponge, &ciphertext, i, last);
        }
        ciphertext.push(sponge.squeeze());

        debug!(chunks = plaintext.len(), "sealed sponge ciphertext");
        Ok(ciphertext)
    }

    fn open(
        &self,
        nonce: Option<FieldElement>,
        ciphertext: &[FieldElement],
    ) -> PreResult<Vec<FieldElement>> {
        if ciphertext.len() < 2 {
            return Err(PreError::MalformedCiphertext {
                len: ciphertext.len(),
            });
        }
        let (body, tag) = ciphertext.split_at(ciphertext.len() - 1);
        let mut sponge = self.keyed_sponge(nonce)?;
        let last = body.len() - 1;
        let mut plaintext = Vec::with_capacity(body.len());

        for (i, chunk) in body.iter().enumerate() {
            let keystream = sponge.squeeze();
            plaintext.push(*chunk - keystream);
            absorb_schedule(&mut sponge, body, i, last);
        }

        if sponge.squeeze() != tag[0] {
            warn!(chunks = body.len(), "sponge ciphertext failed authentication");
            return Err(PreError::Authentication);
        }

        debug!(chunks = body.len(), "opened sponge ciphertext");
        Ok(plaintext)
    }
}

/// Absorb ciphertext after producing chunk `i`: pairs on odd `i`, and the
/// final chunk on its own when it lands on an even index.
fn absorb_schedule(sponge: &mut PoseidonSponge, ciphertext: &[FieldElement], i: usize, last: usize) {
    let odd = i % 2 == 1;
    if odd {
        sponge.absorb(ciphertext[i - 1]);
    }
    if odd || i == last {
        sponge.absorb(ciphertext[i]);
    }
}
