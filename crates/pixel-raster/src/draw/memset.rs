//! Pattern fills by doubling copy.

/// Fills `buf` with `v`.
pub(crate) fn memset(buf: &mut [u8], v: u8) {
    memset_slice(buf, &[v]);
}

/// Fills `buf` with repetitions of `pattern`, truncating the last one.
///
/// The pattern is written once and the filled prefix is then copied onto the
/// remainder, doubling each time, so a fill takes O(log n) copies.
pub(crate) fn memset_slice(buf: &mut [u8], pattern: &[u8]) {
    if pattern.is_empty() {
        return;
    }
    let len = buf.len();
    let mut filled = pattern.len().min(len);
    buf[..filled].copy_from_slice(&pattern[..filled]);
    while filled < len {
        let n = filled.min(len - filled);
        buf.copy_within(..n, filled);
        filled += n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memset() {
        for v in [0x00, 0x2A, 0xFF] {
            let mut b = vec![0x55; 512];
            memset(&mut b, v);
            assert!(b.iter().all(|&x| x == v), "{:#04x}", v);
        }
    }

    #[test]
    fn test_memset_slice() {
        let cases: [(&[u8], usize); 4] = [
            (&[0x00], 128),
            (&[0xFF, 0xFF], 512),
            (&[0x2A, 0x42, 0xAA, 0xFF], 1024),
            (&[1, 2, 3], 300),
        ];
        for (pattern, size) in cases {
            let mut b = vec![0u8; size];
            memset_slice(&mut b, pattern);
            for chunk in b.chunks(pattern.len()) {
                assert_eq!(chunk, &pattern[..chunk.len()]);
            }
        }
    }

    #[test]
    fn test_memset_slice_truncates() {
        let mut b = [0u8; 5];
        memset_slice(&mut b, &[1, 2, 3]);
        assert_eq!(b, [1, 2, 3, 1, 2]);

        let mut b = [0u8; 2];
        memset_slice(&mut b, &[7, 8, 9]);
        assert_eq!(b, [7, 8]);

        let mut b: [u8; 0] = [];
        memset_slice(&mut b, &[1]);
    }
}
