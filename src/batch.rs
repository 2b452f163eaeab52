//! Fixed-size batching for API submission.

use crate::error::{Result, SyncError};

/// Splits `items` into contiguous chunks of at most `size` elements.
///
/// Chunks come out in order and concatenate back to the input; the last
/// chunk may be shorter. The iterator is lazy, so a consumer submitting
/// one chunk at a time never materializes the whole split. A zero size
/// is rejected with [`SyncError::BadChunkSize`].
pub fn chunks<T>(items: &[T], size: usize) -> Result<impl Iterator<Item = &[T]>> {
    if size == 0 {
        return Err(SyncError::BadChunkSize(size));
    }
    Ok(items.chunks(size))
}
