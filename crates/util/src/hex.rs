//! Helpers for converting values to and from hex strings

use std::str::FromStr;

use alloy::primitives::Address;

/// Convert a byte array to a hex string
pub fn bytes_to_hex_string(bytes: &[u8]) -> String {
    let encoded = hex::encode(bytes);
    format!("0x{encoded}")
}

/// Convert a hex string to a byte array
pub fn bytes_from_hex_string(hex: &str) -> Result<Vec<u8>, String> {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    hex::decode(hex).map_err(|e| format!("error deserializing bytes from hex string: {e}"))
}

/// Convert an address to a hex string
pub fn address_to_hex_string(addr: &Address) -> String {
    format!("{addr:#x}")
}

/// Convert a hex string to an address
pub fn address_from_hex_string(hex: &str) -> Result<Address, String> {
    Address::from_str(hex).map_err(|e| format!("error deserializing address from hex string: {e}"))
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;
    use rand::{RngCore, thread_rng};

    use super::*;

    #[test]
    fn test_bytes_serialize_deserialize() {
        let mut rng = thread_rng();
        let mut bytes = [0_u8; 65];
        rng.fill_bytes(&mut bytes);

        let hex = bytes_to_hex_string(&bytes);
        let bytes_rec = bytes_from_hex_string(&hex).unwrap();

        assert_eq!(bytes.to_vec(), bytes_rec)
    }

    #[test]
    fn test_unprefixed_bytes() {
        assert_eq!(bytes_from_hex_string("0a0b").unwrap(), vec![0x0a, 0x0b]);
        assert!(bytes_from_hex_string("0xzz").is_err());
    }

    #[test]
    fn test_address_lowercase() {
        let addr = address!("0x1643E812aE58766192Cf7D2Cf9567dF2C37e9B7F");
        let hex = address_to_hex_string(&addr);
        assert_eq!(hex, "0x1643e812ae58766192cf7d2cf9567df2c37e9b7f");
        assert_eq!(address_from_hex_string(&hex).unwrap(), addr);
    }
}
