//! All-or-nothing reads.
//!
//! A [`Checkpoint`] is a by-value snapshot of the cursor: byte offset, tag-context flag, the
//! current container frame, and the container depth. It borrows nothing and never copies input.
//!
//! Restoring overwrites the live cursor with the snapshot and pops any containers entered since.
//! A checkpoint stays valid only while the container that was current at its creation is still
//! open: once that container (or any enclosing one) has been closed, the saved depth no longer
//! describes the parent stack and the restore is refused with `StaleCheckpoint`.

use core::cmp::Ordering;

use crate::reader::{CborReader, Frame};
use crate::{CborError, ErrorCode};

/// Saved cursor state for rolling back a multi-step read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pos: usize,
    in_tag: bool,
    frame: Frame,
    depth: usize,
    input_len: usize,
}

impl Checkpoint {
    /// Byte offset captured by this checkpoint.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }
}

impl CborReader<'_> {
    /// Capture the current cursor state.
    #[inline]
    #[must_use]
    pub fn create_checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            in_tag: self.in_tag,
            frame: self.frame,
            depth: self.parents.len(),
            input_len: self.input_len(),
        }
    }

    /// The container frame at `checkpoint`'s depth is the one it saved, and the input matches.
    fn is_live(&self, checkpoint: &Checkpoint) -> bool {
        if checkpoint.input_len != self.input_len() {
            return false;
        }
        let open = match self.parents.len().cmp(&checkpoint.depth) {
            Ordering::Greater => self.parents[checkpoint.depth],
            Ordering::Equal => self.frame,
            Ordering::Less => return false,
        };
        open.id == checkpoint.frame.id
    }

    /// Overwrite the cursor with `checkpoint`, discarding all progress made since it was taken.
    ///
    /// # Errors
    ///
    /// Returns `StaleCheckpoint`, leaving the cursor unchanged, if a container that was open when
    /// the checkpoint was taken has since been closed, or if the checkpoint came from a reader
    /// over different input.
    pub fn restore_checkpoint(&mut self, checkpoint: Checkpoint) -> Result<(), CborError> {
        if !self.is_live(&checkpoint) {
            return Err(CborError::new(ErrorCode::StaleCheckpoint, checkpoint.pos));
        }
        self.parents.truncate(checkpoint.depth);
        self.pos = checkpoint.pos;
        self.in_tag = checkpoint.in_tag;
        self.frame = checkpoint.frame;
        Ok(())
    }

    /// Run `read` as a unit: on `Err` the cursor is restored to where it was before the call and
    /// the error is returned unchanged; on `Ok` the progress is kept.
    ///
    /// While `read` runs, containers that were already open cannot be closed
    /// (`NotAtEndOfContainer`), so the rollback always succeeds. Transactions nest. An inner
    /// rollback never disturbs an outer checkpoint.
    ///
    /// # Errors
    ///
    /// Returns whatever `read` returns.
    pub fn transaction<T, F>(&mut self, read: F) -> Result<T, CborError>
    where
        F: FnOnce(&mut Self) -> Result<T, CborError>,
    {
        let checkpoint = self.create_checkpoint();
        let outer_floor = self.floor;
        self.floor = self.parents.len();
        let result = read(self);
        self.floor = outer_floor;
        match result {
            Ok(v) => Ok(v),
            Err(err) => {
                log::trace!(
                    "rolling back to offset {} after {:?} at offset {}",
                    checkpoint.pos,
                    err.code,
                    err.offset
                );
                self.restore_checkpoint(checkpoint)?;
                Err(err)
            }
        }
    }
}
