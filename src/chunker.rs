//! Splitting identifier lists into fixed-size chunks
//!
//! The chunked batch strategies partition the caller's identifier list before
//! dispatch and flatten per-chunk results afterwards. The partition must be
//! exact: concatenating the chunks in order reproduces the input with no
//! drops, duplicates, or reordering.

use crate::error::{Error, Result};

/// Split an ordered identifier list into contiguous chunks of `chunk_size`
///
/// The final chunk holds the remainder and may be shorter. An empty input
/// yields no chunks at all, and an input that divides evenly produces no
/// trailing empty chunk.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when `chunk_size` is zero.
pub fn split<T: Clone>(items: &[T], chunk_size: usize) -> Result<Vec<Vec<T>>> {
    if chunk_size == 0 {
        return Err(Error::invalid_argument("chunk_size must be greater than zero"));
    }

    Ok(items.chunks(chunk_size).map(<[T]>::to_vec).collect())
}
