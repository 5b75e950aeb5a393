use rand_core::{OsRng, RngCore};

use crate::error::{CaKitError, Result};

/// A randomly generated certificate serial number.
///
/// Serials are 64-bit values drawn from the OS RNG, unique per certificate
/// issued within a process lifetime for all practical purposes. Besides its
/// role in the certificate itself, the serial doubles as the uniqueness token
/// embedded in the CA's Common Name, so repeated runs against the same
/// hostname produce distinct subjects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialNumber {
    bytes: [u8; 8],
}

impl SerialNumber {
    /// Draws a fresh serial number from the OS RNG.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; 8];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| CaKitError::SerialGenerationError(e.to_string()))?;
        // The DER INTEGER must be positive and minimally encoded.
        bytes[0] &= 0x7f;
        if bytes[0] == 0 {
            bytes[0] = 0x01;
        }
        Ok(Self { bytes })
    }

    #[cfg(test)]
    pub(crate) fn from_bytes(bytes: [u8; 8]) -> Self {
        Self { bytes }
    }

    /// The serial as a big-endian byte string, suitable for the certificate's
    /// `serialNumber` field.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The serial's low machine word, rendered in decimal when deriving the
    /// CA Common Name.
    pub fn low_word(&self) -> u64 {
        u64::from_be_bytes(self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_is_positive() {
        for _ in 0..32 {
            let serial = SerialNumber::generate().unwrap();
            assert!(serial.as_bytes()[0] & 0x80 == 0);
            assert_ne!(serial.as_bytes()[0], 0);
        }
    }

    #[test]
    fn test_low_word_matches_bytes() {
        let serial = SerialNumber::from_bytes([0x01, 0, 0, 0, 0, 0, 0, 0x2a]);
        assert_eq!(serial.low_word(), (1u64 << 56) + 42);
    }

    #[test]
    fn test_serials_differ_between_draws() {
        let a = SerialNumber::generate().unwrap();
        let b = SerialNumber::generate().unwrap();
        assert_ne!(a, b);
    }
}
