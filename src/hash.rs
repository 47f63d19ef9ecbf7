//! Keyed non-cryptographic hashing for attacker-controlled keys.
//!
//! Indexing decoded map keys or strings in a hash table with a fixed hash function lets an
//! attacker precompute colliding inputs and degrade lookups to linear time. Keying the hash with
//! a per-process random seed makes the output unpredictable without the seed.
//!
//! The function is built from a single 64-bit state `(p0, p1)` and an add-rotate-xor block mix.
//! It is **not** a MAC and gives no secrecy guarantees.
//!
//! Input lengths are assumed to fit the block counter implied by `usize`; the tail sentinel only
//! distinguishes the final 0..=3 bytes.

use core::fmt;
use core::hash::{BuildHasher, Hasher};

use once_cell::sync::OnceCell;

use crate::{CborError, ErrorCode};

static DEFAULT_SEED: OnceCell<u64> = OnceCell::new();

#[inline]
const fn block(mut p0: u32, mut p1: u32) -> (u32, u32) {
    p1 ^= p0;
    p0 = p0.rotate_left(20);
    p0 = p0.wrapping_add(p1);
    p1 = p1.rotate_left(9);
    p1 ^= p0;
    p0 = p0.rotate_left(27);
    p0 = p0.wrapping_add(p1);
    p1 = p1.rotate_left(19);
    (p0, p1)
}

/// Length-tagged sentinel for the final 0..=3 bytes, so tails of different lengths never alias.
#[inline]
fn tail_sentinel(tail: &[u8]) -> u32 {
    match *tail {
        [] => 0x80,
        [b0] => 0x8000 | u32::from(b0),
        [b0, b1] => 0x0080_0000 | u32::from(u16::from_le_bytes([b0, b1])),
        [b0, b1, b2, ..] => {
            0x8000_0000 | (u32::from(b2) << 16) | u32::from(u16::from_le_bytes([b0, b1]))
        }
    }
}

#[inline]
fn finalize(p0: u32, p1: u32, tail: &[u8]) -> u64 {
    let (p0, p1) = block(p0.wrapping_add(tail_sentinel(tail)), p1);
    let (p0, p1) = block(p0, p1);
    let (p0, p1) = block(p0, p1);
    (u64::from(p1) << 32) | u64::from(p0)
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
const fn split_key(key: u64) -> (u32, u32) {
    (key as u32, (key >> 32) as u32)
}

/// Hash `data` under `key` to 64 bits.
#[must_use]
pub fn hash64(data: &[u8], key: u64) -> u64 {
    let (mut p0, mut p1) = split_key(key);
    let mut blocks = data.chunks_exact(4);
    for b in &mut blocks {
        p0 = p0.wrapping_add(u32::from_le_bytes([b[0], b[1], b[2], b[3]]));
        (p0, p1) = block(p0, p1);
    }
    finalize(p0, p1, blocks.remainder())
}

/// Hash `data` under `key` to 32 bits: the XOR of the halves of [`hash64`].
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn hash32(data: &[u8], key: u64) -> u32 {
    let h = hash64(data, key);
    ((h >> 32) as u32) ^ (h as u32)
}

/// Hash `data` under the process-wide [`default_seed`].
///
/// # Panics
///
/// Panics if the default seed cannot be initialized (see [`default_seed`]).
#[must_use]
pub fn hash64_default(data: &[u8]) -> u64 {
    hash64(data, default_seed())
}

fn generate_seed() -> Result<u64, CborError> {
    let mut buf = [0u8; 8];
    getrandom::fill(&mut buf).map_err(|err| {
        log::error!("secure random source failed while seeding hash: {err}");
        CborError::new(ErrorCode::RandomSourceUnavailable, 0)
    })?;
    log::debug!("initialized default hash seed");
    Ok(u64::from_le_bytes(buf))
}

/// Return the process-wide default hash key, drawing it from the OS secure random source on first
/// use.
///
/// Initialization happens at most once even under concurrent first calls. A failed attempt caches
/// nothing, so a later call retries.
///
/// # Errors
///
/// Returns `RandomSourceUnavailable` if the OS cannot supply secure random bytes. There is no
/// fixed fallback seed.
pub fn try_default_seed() -> Result<u64, CborError> {
    DEFAULT_SEED.get_or_try_init(generate_seed).copied()
}

/// Return the process-wide default hash key.
///
/// # Panics
///
/// Panics if the OS secure random source is unavailable. Hashing attacker-supplied keys with a
/// predictable seed is not an acceptable degradation.
#[must_use]
pub fn default_seed() -> u64 {
    match try_default_seed() {
        Ok(seed) => seed,
        Err(err) => panic!("{err}"),
    }
}

/// Streaming form of [`hash64`].
///
/// `finish` equals `hash64` over the concatenation of every slice passed to `write`, regardless of
/// how the input was split.
#[derive(Clone)]
pub struct KeyedHasher {
    p0: u32,
    p1: u32,
    pending: [u8; 4],
    pending_len: usize,
}

impl KeyedHasher {
    /// Start a hash under `key`.
    #[must_use]
    pub const fn new(key: u64) -> Self {
        let (p0, p1) = split_key(key);
        Self {
            p0,
            p1,
            pending: [0; 4],
            pending_len: 0,
        }
    }

    #[inline]
    fn absorb(&mut self, word: [u8; 4]) {
        let p0 = self.p0.wrapping_add(u32::from_le_bytes(word));
        (self.p0, self.p1) = block(p0, self.p1);
    }
}

impl fmt::Debug for KeyedHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedHasher").finish_non_exhaustive()
    }
}

impl Hasher for KeyedHasher {
    fn write(&mut self, mut bytes: &[u8]) {
        if self.pending_len > 0 {
            let take = (4 - self.pending_len).min(bytes.len());
            self.pending[self.pending_len..self.pending_len + take].copy_from_slice(&bytes[..take]);
            self.pending_len += take;
            bytes = &bytes[take..];
            if self.pending_len < 4 {
                return;
            }
            self.absorb(self.pending);
            self.pending_len = 0;
        }

        let mut blocks = bytes.chunks_exact(4);
        for b in &mut blocks {
            self.absorb([b[0], b[1], b[2], b[3]]);
        }
        let rest = blocks.remainder();
        self.pending[..rest.len()].copy_from_slice(rest);
        self.pending_len = rest.len();
    }

    fn finish(&self) -> u64 {
        finalize(self.p0, self.p1, &self.pending[..self.pending_len])
    }
}

/// [`BuildHasher`] producing [`KeyedHasher`]s under one key.
///
/// `RandomKeyState::new()` uses the process-wide default seed, so maps built in the same process
/// agree, while hashes differ between processes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RandomKeyState {
    key: u64,
}

impl RandomKeyState {
    /// Keyed with the process-wide default seed.
    ///
    /// # Panics
    ///
    /// Panics if the default seed cannot be initialized (see [`default_seed`]).
    #[must_use]
    pub fn new() -> Self {
        Self {
            key: default_seed(),
        }
    }

    /// Keyed with an explicit `key`. Use only for reproducible tests; a fixed key forfeits the
    /// flooding defense.
    #[must_use]
    pub const fn with_key(key: u64) -> Self {
        Self { key }
    }
}

impl Default for RandomKeyState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RandomKeyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomKeyState").finish_non_exhaustive()
    }
}

impl BuildHasher for RandomKeyState {
    type Hasher = KeyedHasher;

    fn build_hasher(&self) -> KeyedHasher {
        KeyedHasher::new(self.key)
    }
}
