//! MD5 quad digest: the continuum's content hasher.
//!
//! MD5 is used purely as a diffusion function, not a security primitive.
//! Swapping in a faster hash would change the ring layout and break
//! compatibility with peer routers, so the algorithm is fixed. The functions
//! are public because peers verifying ring contents need to derive the same
//! points and targets.

use md5::{Digest, Md5};

/// Number of 32-bit points carved out of one 16-byte digest.
pub const POINTS_PER_QUAD: usize = 4;

/// Hash the concatenated input segments and reinterpret the 16-byte digest
/// as four 32-bit points.
///
/// The reinterpretation uses the native byte order of the host. Peer routers
/// on like-endian machines derive bit-identical points; this is an observable
/// wire property, not an implementation detail.
pub fn quad(parts: &[&[u8]]) -> [u32; POINTS_PER_QUAD] {
    let mut hasher = Md5::new();
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();

    let mut points = [0u32; POINTS_PER_QUAD];
    for (point, bytes) in points.iter_mut().zip(digest.chunks_exact(4)) {
        *point = u32::from_ne_bytes(bytes.try_into().expect("4-byte chunk"));
    }
    points
}

/// Fold a quad into a single lookup target by XORing its points.
pub fn fold(points: [u32; POINTS_PER_QUAD]) -> u32 {
    points.into_iter().fold(0, |acc, point| acc ^ point)
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 1321 test vector: MD5("") = d41d8cd98f00b204e9800998ecf8427e.
    const EMPTY_MD5: [u8; 16] = [
        0xd4, 0x1d, 0x8c, 0xd9, 0x8f, 0x00, 0xb2, 0x04, 0xe9, 0x80, 0x09, 0x98, 0xec, 0xf8, 0x42,
        0x7e,
    ];

    fn points_of(bytes: &[u8; 16]) -> [u32; 4] {
        let mut points = [0u32; 4];
        for (point, chunk) in points.iter_mut().zip(bytes.chunks_exact(4)) {
            *point = u32::from_ne_bytes(chunk.try_into().unwrap());
        }
        points
    }

    #[test]
    fn test_quad_matches_md5_reference_vector() {
        assert_eq!(quad(&[b""]), points_of(&EMPTY_MD5));
    }

    #[test]
    fn test_quad_of_segments_equals_quad_of_concatenation() {
        // The streaming interface must be insensitive to segment boundaries.
        assert_eq!(quad(&[b"backend", b"-a"]), quad(&[b"backend-a"]));
    }

    #[test]
    fn test_quad_deterministic() {
        let a = quad(&[b"some-key"]);
        let b = quad(&[b"some-key"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_steps_produce_distinct_quads() {
        let step0 = 0usize.to_ne_bytes();
        let step1 = 1usize.to_ne_bytes();
        assert_ne!(quad(&[b"node", &step0]), quad(&[b"node", &step1]));
    }

    #[test]
    fn test_fold_xors_all_points() {
        assert_eq!(fold([1, 2, 4, 8]), 15);
        assert_eq!(fold([0xffff_ffff, 0xffff_ffff, 0, 0]), 0);
        let expected = points_of(&EMPTY_MD5).into_iter().fold(0, |acc, p| acc ^ p);
        assert_eq!(fold(quad(&[b""])), expected);
    }
}
