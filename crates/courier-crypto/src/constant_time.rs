//! Constant-time byte comparison

use subtle::ConstantTimeEq;

/// Compare two byte strings without leaking where they first differ.
///
/// Slices of different lengths compare unequal. Length is not secret for any
/// tag or digest in the envelope formats, so only the contents are compared
/// in constant time.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
