//! Lenient big-endian hex decoding
//!
//! Every byte maps to a nibble, any byte that is not a hex digit counts as 0.
//! Both reducers go through [`decode`] so their totals stay comparable.

use seq_macro::seq;

use crate::{Token, TOKEN_LEN};

// The unrolled loop below is written out for 32 digits.
const _: () = assert!(TOKEN_LEN == 32);

const NIBBLES: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 10 {
        table[b'0' as usize + i] = i as u8;
        i += 1;
    }
    let mut i = 0;
    while i < 6 {
        table[b'a' as usize + i] = 10 + i as u8;
        table[b'A' as usize + i] = 10 + i as u8;
        i += 1;
    }
    table
};

#[inline]
pub fn nibble(c: u8) -> u8 {
    NIBBLES[c as usize]
}

#[inline]
pub fn decode(token: &Token) -> u128 {
    let bytes = token.as_bytes();
    let mut value = 0u128;
    seq!(I in 0..32 {
        value = (value << 4) | nibble(bytes[I]) as u128;
    });
    value
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn decode_str(s: &str) -> u128 {
        decode(&Token::new(s.as_bytes()))
    }

    #[test]
    fn test_nibble() {
        assert_eq!(nibble(b'0'), 0);
        assert_eq!(nibble(b'9'), 9);
        assert_eq!(nibble(b'a'), 10);
        assert_eq!(nibble(b'F'), 15);
        assert_eq!(nibble(b'g'), 0);
        assert_eq!(nibble(b'\0'), 0);
        assert_eq!(nibble(0xFF), 0);
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode_str("00000000000000000000000000000000"), 0);
        assert_eq!(decode_str("00000000000000000000000000000001"), 1);
        assert_eq!(decode_str("0000000000000000000000000000002a"), 42);
        assert_eq!(decode_str("ffffffffffffffffffffffffffffffff"), u128::MAX);
        assert_eq!(decode_str("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"), u128::MAX);
        assert_eq!(
            decode_str("0123456789abcdef0123456789ABCDEF"),
            0x0123456789abcdef0123456789abcdef
        );
    }

    #[test]
    fn test_decode_is_case_insensitive() {
        assert_eq!(decode_str("aB"), decode_str("Ab"));
    }

    #[test]
    fn test_decode_lenient() {
        // Non-hex characters keep their position but contribute 0.
        assert_eq!(decode_str("000000000000000000000000000000g1"), 1);
        assert_eq!(decode_str("0000000000000000000000000000001z"), 0x10);
        assert_eq!(decode_str("zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz"), 0);
        // Short tokens are padded on the right.
        assert_eq!(decode_str("1"), 1u128 << 124);
        assert_eq!(decode_str(""), 0);
    }

    proptest! {
        #[test]
        fn decode_matches_from_str_radix(value in any::<u128>()) {
            let lower = format!("{:032x}", value);
            let upper = format!("{:032X}", value);
            prop_assert_eq!(decode_str(&lower), value);
            prop_assert_eq!(decode_str(&upper), value);
            prop_assert_eq!(u128::from_str_radix(&lower, 16).unwrap(), value);
        }
    }
}
