//! Wallet signature verification for garden claims.
//!
//! The command processor only needs a yes/no answer to "did `address` sign
//! `message`?". [`SignatureVerifier`] is that seam; [`Ed25519Verifier`] is
//! the default implementation, treating the address as a hex-encoded
//! ed25519 public key.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

/// Errors raised while decoding a signature or an address.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The address is not valid hex.
    #[error("address is not hex: {0}")]
    AddressEncoding(hex::FromHexError),

    /// The signature is not valid hex.
    #[error("signature is not hex: {0}")]
    SignatureEncoding(hex::FromHexError),

    /// The decoded value has the wrong length.
    #[error("{what} must be {expected} bytes, got {actual}")]
    Length {
        /// Which input was malformed.
        what: &'static str,
        /// Required byte length.
        expected: usize,
        /// Decoded byte length.
        actual: usize,
    },

    /// The address bytes are not a valid curve point.
    #[error("address is not a valid public key: {0}")]
    InvalidKey(ed25519_dalek::SignatureError),
}

/// Checks that a message was signed by the holder of an address.
pub trait SignatureVerifier: Send {
    /// Returns `Ok(true)` when `signature` over `message` verifies for
    /// `address`, `Ok(false)` when it decodes but does not verify.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError`] when the inputs cannot be decoded.
    fn verify(&self, message: &str, signature: &str, address: &str) -> Result<bool, VerifyError>;
}

/// Verifies ed25519 signatures where the address is the public key.
///
/// Both the address (32 bytes) and the signature (64 bytes) are hex, with
/// an optional `0x` prefix. The signed payload is the UTF-8 message.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, message: &str, signature: &str, address: &str) -> Result<bool, VerifyError> {
        let key_bytes: [u8; 32] =
            decode_fixed(address, "address").map_err(|e| e.into_address_error())?;
        let sig_bytes: [u8; 64] =
            decode_fixed(signature, "signature").map_err(|e| e.into_signature_error())?;

        let key = VerifyingKey::from_bytes(&key_bytes).map_err(VerifyError::InvalidKey)?;
        let signature = Signature::from_bytes(&sig_bytes);

        Ok(key.verify(message.as_bytes(), &signature).is_ok())
    }
}

/// Hex decoding failure before we know which input it belongs to.
enum DecodeError {
    Hex(hex::FromHexError),
    Length(VerifyError),
}

impl DecodeError {
    fn into_address_error(self) -> VerifyError {
        match self {
            Self::Hex(e) => VerifyError::AddressEncoding(e),
            Self::Length(e) => e,
        }
    }

    fn into_signature_error(self) -> VerifyError {
        match self {
            Self::Hex(e) => VerifyError::SignatureEncoding(e),
            Self::Length(e) => e,
        }
    }
}

fn decode_fixed<const N: usize>(input: &str, what: &'static str) -> Result<[u8; N], DecodeError> {
    let trimmed = input.strip_prefix("0x").unwrap_or(input);
    let bytes = hex::decode(trimmed).map_err(DecodeError::Hex)?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_rejected: Vec<u8>| {
        DecodeError::Length(VerifyError::Length {
            what,
            expected: N,
            actual,
        })
    })
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::{Signer, SigningKey};

    use super::*;

    const MESSAGE: &str = "claim garden at 0,0";

    fn keypair() -> SigningKey {
        SigningKey::from_bytes(&[7; 32])
    }

    fn address_of(key: &SigningKey) -> String {
        hex::encode(key.verifying_key().to_bytes())
    }

    fn sign(key: &SigningKey, message: &str) -> String {
        hex::encode(key.sign(message.as_bytes()).to_bytes())
    }

    #[test]
    fn accepts_matching_signature() {
        let key = keypair();
        let result = Ed25519Verifier.verify(MESSAGE, &sign(&key, MESSAGE), &address_of(&key));
        assert!(matches!(result, Ok(true)));
    }

    #[test]
    fn accepts_0x_prefixes() {
        let key = keypair();
        let signature = format!("0x{}", sign(&key, MESSAGE));
        let address = format!("0x{}", address_of(&key));
        assert!(matches!(
            Ed25519Verifier.verify(MESSAGE, &signature, &address),
            Ok(true)
        ));
    }

    #[test]
    fn rejects_other_signer() {
        let key = keypair();
        let other = SigningKey::from_bytes(&[9; 32]);
        let result = Ed25519Verifier.verify(MESSAGE, &sign(&other, MESSAGE), &address_of(&key));
        assert!(matches!(result, Ok(false)));
    }

    #[test]
    fn rejects_tampered_message() {
        let key = keypair();
        let result = Ed25519Verifier.verify("claim garden at 9,9", &sign(&key, MESSAGE), &address_of(&key));
        assert!(matches!(result, Ok(false)));
    }

    #[test]
    fn malformed_inputs_are_errors() {
        let key = keypair();
        let signature = sign(&key, MESSAGE);

        assert!(matches!(
            Ed25519Verifier.verify(MESSAGE, &signature, "not-hex"),
            Err(VerifyError::AddressEncoding(_))
        ));
        assert!(matches!(
            Ed25519Verifier.verify(MESSAGE, "zz", &address_of(&key)),
            Err(VerifyError::SignatureEncoding(_))
        ));
        assert!(matches!(
            Ed25519Verifier.verify(MESSAGE, &signature, "abcd"),
            Err(VerifyError::Length { what: "address", expected: 32, actual: 2 })
        ));
    }
}
