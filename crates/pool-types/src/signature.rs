//! Decomposition of raw ECDSA signatures into their `{v, r, s}` components

use alloy::primitives::{B256, Signature, U256};
use util::hex::{bytes_from_hex_string, bytes_to_hex_string};

use crate::error::PoolTypesError;

/// The byte length of a raw `r || s || v` signature
pub const SIGNATURE_BYTES: usize = 65;
/// The offset added to a y-parity bit to form a legacy recovery id
const LEGACY_V_OFFSET: u8 = 27;

/// A permit signature as consumed by `depositStEthWithPermit`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PermitSignature {
    /// The recovery id, normalized to 27 or 28
    pub v: u8,
    /// The `r` scalar
    pub r: B256,
    /// The `s` scalar
    pub s: B256,
}

impl PermitSignature {
    /// Decompose a raw 65-byte signature
    ///
    /// A trailing recovery byte of 0 or 1 is a bare y-parity and is lifted to
    /// the legacy 27/28 form
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PoolTypesError> {
        let sig = Signature::try_from(bytes).map_err(PoolTypesError::invalid_signature)?;
        Ok(Self::from(sig))
    }

    /// Decompose a hex encoded signature, as returned by a wallet
    pub fn from_hex(hex: &str) -> Result<Self, PoolTypesError> {
        let bytes = bytes_from_hex_string(hex).map_err(PoolTypesError::invalid_signature)?;
        Self::from_bytes(&bytes)
    }

    /// The signature as an alloy [`Signature`]
    pub fn to_signature(&self) -> Signature {
        let r = U256::from_be_bytes(self.r.0);
        let s = U256::from_be_bytes(self.s.0);
        Signature::new(r, s, self.v != LEGACY_V_OFFSET)
    }

    /// Serialize back into the raw `r || s || v` layout
    pub fn to_bytes(&self) -> [u8; SIGNATURE_BYTES] {
        self.to_signature().as_bytes()
    }

    /// Hex encode the raw signature
    pub fn to_hex(&self) -> String {
        bytes_to_hex_string(&self.to_bytes())
    }
}

impl From<Signature> for PermitSignature {
    fn from(sig: Signature) -> Self {
        Self {
            v: LEGACY_V_OFFSET + u8::from(sig.v()),
            r: B256::from(sig.r().to_be_bytes::<32>()),
            s: B256::from(sig.s().to_be_bytes::<32>()),
        }
    }
}
