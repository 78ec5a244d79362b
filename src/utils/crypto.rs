//! Cryptographic utilities for API signing

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

use crate::errors::{CcxtError, CcxtResult};

/// Hash function behind the HMAC an exchange signs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }
}

/// HMAC 서명을 소문자 hex 문자열로 반환
pub fn hmac_hex(algorithm: HashAlgorithm, secret: &str, message: &str) -> CcxtResult<String> {
    match algorithm {
        HashAlgorithm::Sha256 => mac_hex::<Hmac<Sha256>>(secret, message),
        HashAlgorithm::Sha384 => mac_hex::<Hmac<Sha384>>(secret, message),
        HashAlgorithm::Sha512 => mac_hex::<Hmac<Sha512>>(secret, message),
    }
}

fn mac_hex<M: Mac + KeyInit>(secret: &str, message: &str) -> CcxtResult<String> {
    let mut mac = <M as KeyInit>::new_from_slice(secret.as_bytes()).map_err(|_| {
        CcxtError::AuthenticationError {
            message: "Invalid secret key".to_string(),
        }
    })?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4231 test case 2
    const KEY: &str = "Jefe";
    const DATA: &str = "what do ya want for nothing?";

    #[test]
    fn test_hmac_sha256_vector() {
        assert_eq!(
            hmac_hex(HashAlgorithm::Sha256, KEY, DATA).unwrap(),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_hmac_sha512_vector() {
        assert_eq!(
            hmac_hex(HashAlgorithm::Sha512, KEY, DATA).unwrap(),
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
             9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn test_hex_is_lowercase() {
        let digest = hmac_hex(HashAlgorithm::Sha384, "s", "GET|/api/v2/orders|").unwrap();
        assert_eq!(digest.len(), 96);
        assert_eq!(digest, digest.to_lowercase());
    }

    #[test]
    fn test_default_algorithm() {
        assert_eq!(HashAlgorithm::default(), HashAlgorithm::Sha256);
        assert_eq!(HashAlgorithm::default().as_str(), "sha256");
    }
}
