//! Portable string hashing
//!
//! The standard library's `DefaultHasher` is randomly keyed per process, so it
//! cannot be used where a selection must be reproducible across runs and
//! across reimplementations. This module provides 32-bit FNV-1a, which is
//! fully specified by its offset basis and prime.

/// FNV-1a 32-bit offset basis
pub const FNV1A_32_OFFSET_BASIS: u32 = 0x811c_9dc5;

/// FNV-1a 32-bit prime
pub const FNV1A_32_PRIME: u32 = 0x0100_0193;

/// Hashes bytes with 32-bit FNV-1a (XOR each byte, then multiply, wrapping)
///
/// # Example
///
/// ```rust
/// use core_kernel::fnv1a_32;
///
/// assert_eq!(fnv1a_32(b"a"), 0xe40c_292c);
/// ```
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV1A_32_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV1A_32_PRIME)
    })
}

/// Maps a string onto one of `buckets` slots using its FNV-1a hash of the UTF-8 bytes
///
/// Returns 0 when `buckets` is 0.
pub fn bucket_of(value: &str, buckets: u32) -> usize {
    if buckets == 0 {
        return 0;
    }
    (fnv1a_32(value.as_bytes()) % buckets) as usize
}
