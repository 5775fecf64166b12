//! Token input
//!
//! Tokens are whitespace separated. A word longer than [`TOKEN_LEN`] is cut
//! into consecutive [`TOKEN_LEN`]-byte tokens; shorter words are kept and
//! padded. Nothing is rejected, malformed digits are the decoder's concern.

use std::{fs::File, io, path::Path};

use memmap2::Mmap;
use tracing::debug;

use crate::{Error, Result, Token, TOKEN_LEN, TOKEN_STRIDE};

/// Number of tokens a memory budget pays for.
pub fn capacity(memory_budget: usize) -> usize {
    memory_budget / TOKEN_STRIDE
}

/// Reads at most `capacity` tokens from `buf`.
pub fn parse(buf: &[u8], capacity: usize) -> Result<Vec<Token>> {
    // Every token takes at least one byte plus a separator, except the last.
    let upper_bound = buf.len().div_ceil(2);
    let mut tokens = Vec::new();
    tokens.try_reserve_exact(capacity.min(upper_bound))?;

    let words = buf
        .split(u8::is_ascii_whitespace)
        .filter(|word| !word.is_empty());
    'words: for word in words {
        for piece in word.chunks(TOKEN_LEN) {
            if tokens.len() == capacity {
                break 'words;
            }
            tokens.push(Token::new(piece));
        }
    }

    Ok(tokens)
}

/// Maps the file at `path` and reads as many tokens as `memory_budget` allows.
pub fn load(path: &Path, memory_budget: usize) -> Result<Vec<Token>> {
    let capacity = capacity(memory_budget);
    if capacity == 0 {
        return Err(Error::Capacity {
            budget: memory_budget,
        });
    }

    let io_err = |source: io::Error| Error::Io {
        path: path.to_owned(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    // Zero-length mappings are rejected on some platforms.
    if file.metadata().map_err(io_err)?.len() == 0 {
        debug!(path = %path.display(), "empty input");
        return Ok(Vec::new());
    }
    let mmap = unsafe { Mmap::map(&file) }.map_err(io_err)?;

    let tokens = parse(&mmap, capacity)?;
    debug!(
        path = %path.display(),
        tokens = tokens.len(),
        capacity,
        "loaded tokens"
    );
    Ok(tokens)
}
