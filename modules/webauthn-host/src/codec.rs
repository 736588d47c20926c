//! Conversions between console text and the byte layouts used across the
//! enclave boundary.

/// Decodes pairs of hex digits. An odd-length or otherwise malformed input
/// yields an empty vector.
pub fn hex_to_bytes(hex_str: &str) -> Vec<u8> {
    if hex_str.len() % 2 != 0 {
        return Vec::new();
    }
    hex::decode(hex_str).unwrap_or_default()
}

pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

pub fn reverse_limb_order<T: Copy>(limbs: &[T]) -> Vec<T> {
    limbs.iter().rev().copied().collect()
}

/// A fixed-width word of a little-endian multi-word integer.
pub trait Limb: Copy {
    fn to_hex(&self) -> String;
}

impl Limb for u8 {
    fn to_hex(&self) -> String {
        format!("{:02x}", self)
    }
}

impl Limb for u32 {
    fn to_hex(&self) -> String {
        format!("{:08x}", self)
    }
}

/// Renders little-endian limbs as one big-endian hex number.
pub fn to_be_hex<T: Limb>(limbs: &[T]) -> String {
    reverse_limb_order(limbs)
        .iter()
        .map(Limb::to_hex)
        .collect()
}
