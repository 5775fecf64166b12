//! Single-threaded baseline: one pass in index order, same decode rule as
//! the parallel workers.

use crate::{decode::decode, Token, WideSum};

pub fn reduce_sequential(tokens: &[Token]) -> WideSum {
    let mut sum = WideSum::ZERO;
    for token in tokens {
        sum += decode(token);
    }
    sum
}
