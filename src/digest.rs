use crate::errors::{Error, Result};
use md5::Md5;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Number of bytes in every digest handed to the scrambler.
pub const DIGEST_LEN: usize = 16;

/// The 128-bit hashing primitive behind every scrambled value.
///
/// - **Md5**: byte-compatible with previously scrambled fixtures. This is the default.
/// - **Sha256**: SHA-256 truncated to its first 128 bits, for tool chains that refuse MD5.
///
/// Neither is used as a security boundary; both only need to be deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestAlgorithm {
    #[default]
    Md5,
    Sha256,
}

impl DigestAlgorithm {
    /// Hashes the UTF-8 bytes of `input` into a 16 byte digest.
    pub fn digest(&self, input: &str) -> [u8; DIGEST_LEN] {
        let mut out = [0u8; DIGEST_LEN];
        match self {
            DigestAlgorithm::Md5 => {
                out.copy_from_slice(&Md5::digest(input.as_bytes()));
            }
            DigestAlgorithm::Sha256 => {
                let full = Sha256::digest(input.as_bytes());
                out.copy_from_slice(&full[..DIGEST_LEN]);
            }
        }
        out
    }

    /// The digest of `input` as 32 lowercase hex characters.
    pub fn hex_digest(&self, input: &str) -> String {
        hex::encode(self.digest(input))
    }

    /// The digest of `input` read as a big-endian unsigned integer.
    pub fn digest_u128(&self, input: &str) -> u128 {
        u128::from_be_bytes(self.digest(input))
    }

    /// The lowercase name used in config files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "md5",
            DigestAlgorithm::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "md5" => Ok(DigestAlgorithm::Md5),
            "sha256" => Ok(DigestAlgorithm::Sha256),
            other => Err(format!("unknown digest algorithm '{other}' (expected md5 or sha256)").into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_known_values() {
        assert_eq!(
            DigestAlgorithm::Md5.hex_digest(""),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
        assert_eq!(
            DigestAlgorithm::Md5.hex_digest("salt"),
            "ceb20772e0c9d240c75eb26b0e37abee"
        );
    }

    #[test]
    fn test_sha256_is_truncated_to_128_bits() {
        let hex = DigestAlgorithm::Sha256.hex_digest("b9b4ffaasalt");
        assert_eq!(hex, "bfe9e7036b40a58c03c8ca6459e365a0");
        assert_eq!(hex.len(), DIGEST_LEN * 2);
    }

    #[test]
    fn test_u128_matches_hex() {
        let algo = DigestAlgorithm::Md5;
        let value = algo.digest_u128("salt");
        assert_eq!(format!("{value:032x}"), algo.hex_digest("salt"));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("md5".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Md5);
        assert_eq!(" SHA256 ".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha256);
        assert!(matches!(
            "crc32".parse::<DigestAlgorithm>(),
            Err(Error::Config(_))
        ));
        assert!("sha-256".parse::<DigestAlgorithm>().is_err());
        assert_eq!(DigestAlgorithm::Sha256.to_string(), "sha256");
    }
}
