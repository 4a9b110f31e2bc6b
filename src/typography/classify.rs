//! Byte classification tables for the replacement scanner.
//!
//! Each table answers a single yes/no question about a byte in O(1). They
//! are built at compile time and never change, so any number of scans can
//! read them concurrently.

/// Build a 256-entry membership table from a set of bytes.
const fn table(members: &[u8]) -> [bool; 256] {
    let mut table = [false; 256];
    let mut i = 0;
    while i < members.len() {
        table[members[i] as usize] = true;
        i += 1;
    }
    table
}

/// Bytes that can begin a replacement pattern.
static TRIGGER: [bool; 256] = table(b"(!+,-.?");

/// Letters allowed after `(` in `(c)`, `(r)`, `(p)` and `(tm)`.
static SYMBOL: [bool; 256] = table(b"cprtCPRT");

/// Members of an interrobang run.
static INTERROBANG: [bool; 256] = table(b"?!");

/// Whether `b` can start a replacement pattern.
#[inline]
pub fn is_trigger(b: u8) -> bool {
    TRIGGER[b as usize]
}

/// Whether `b` is a symbol letter (case-insensitive `c`, `p`, `r`, `t`).
#[inline]
pub fn is_symbol(b: u8) -> bool {
    SYMBOL[b as usize]
}

/// Whether `b` is `?` or `!`.
#[inline]
pub fn is_interrobang(b: u8) -> bool {
    INTERROBANG[b as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_set() {
        let triggers: Vec<u8> = (0..=255u8).filter(|&b| is_trigger(b)).collect();
        assert_eq!(triggers, b"!(+,-.?".to_vec());
    }

    #[test]
    fn test_symbol_set_is_case_insensitive() {
        for b in b"cprtCPRT" {
            assert!(is_symbol(*b));
        }
        assert!(!is_symbol(b'm'));
        assert!(!is_symbol(b'('));
        assert_eq!((0..=255u8).filter(|&b| is_symbol(b)).count(), 8);
    }

    #[test]
    fn test_interrobang_set() {
        assert!(is_interrobang(b'?'));
        assert!(is_interrobang(b'!'));
        assert!(!is_interrobang(b'.'));
        assert_eq!((0..=255u8).filter(|&b| is_interrobang(b)).count(), 2);
    }

    #[test]
    fn test_non_ascii_bytes_never_match() {
        for b in 0x80..=0xFFu8 {
            assert!(!is_trigger(b));
            assert!(!is_symbol(b));
            assert!(!is_interrobang(b));
        }
    }
}
