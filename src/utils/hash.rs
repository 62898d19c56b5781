//! Content hashing using FxHash.
//!
//! Fast and deterministic within one build. Used to detect whether a
//! config file actually changed before reloading it, and to tag render
//! artifacts with the script path they came from.

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Compute 64-bit hash from byte data.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_ref());
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_is_stable() {
        assert_eq!(compute("delay = 1000"), compute("delay = 1000"));
        assert_ne!(compute("delay = 1000"), compute("delay = 1001"));
    }
}
