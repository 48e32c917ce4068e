//! Unique code allocation.
//!
//! Client codes (4 digits) and access keys (6 upper-case alphanumerics) are
//! short random strings that must be unique within their table. Allocation
//! works in two layers:
//!
//! 1. [`CodeAllocator::allocate`] draws candidates and asks a [`CodeRegistry`]
//!    whether each one is taken, up to `max_attempts` draws.
//! 2. [`CodeAllocator::insert_unique`] runs a whole allocate-and-insert cycle and
//!    repeats it when the insert reports [`AppError::CodeCollision`].
//!
//! The pre-check in (1) only avoids obvious collisions. Two requests can both
//! see a code as free, so the unique constraint checked by the insert in (2) is
//! what actually guarantees uniqueness.

use crate::error::AppError;
use rand::Rng;
use std::future::Future;

pub const DIGITS: &[u8] = b"0123456789";
pub const UPPER_ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Alphabet and length of a generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeFormat {
    pub alphabet: &'static [u8],
    pub length: usize,
}

impl CodeFormat {
    /// Client login identifier assigned to every booking.
    pub const CLIENT_CODE: Self = Self {
        alphabet: DIGITS,
        length: 4,
    };

    /// Access key handed out to prospective clients.
    pub const ACCESS_KEY: Self = Self {
        alphabet: UPPER_ALPHANUMERIC,
        length: 6,
    };

    /// Draw one code, each character uniform over the alphabet.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        (0..self.length)
            .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())] as char)
            .collect()
    }

    /// Whether `code` could have been produced by this format.
    pub fn matches(&self, code: &str) -> bool {
        code.len() == self.length && code.bytes().all(|b| self.alphabet.contains(&b))
    }
}

/// A persistent set of codes already in use.
pub trait CodeRegistry {
    fn contains(&mut self, code: &str) -> impl Future<Output = Result<bool, AppError>> + Send;
}

/// Bounded-retry allocator for one [`CodeFormat`].
#[derive(Debug, Clone, Copy)]
pub struct CodeAllocator {
    format: CodeFormat,
    max_attempts: u32,
    insert_cycles: u32,
}

impl CodeAllocator {
    /// Both budgets are clamped to at least one attempt.
    pub fn new(format: CodeFormat, max_attempts: u32, insert_cycles: u32) -> Self {
        Self {
            format,
            max_attempts: max_attempts.max(1),
            insert_cycles: insert_cycles.max(1),
        }
    }

    /// Draw a candidate from the thread-local RNG.
    pub fn draw(&self) -> String {
        self.format.generate(&mut rand::rng())
    }

    /// Find a code the registry does not know about yet.
    ///
    /// # Errors
    ///
    /// - `AllocationExhausted`: every one of `max_attempts` draws was taken
    /// - whatever the registry lookup returns
    pub async fn allocate<R: CodeRegistry>(&self, registry: &mut R) -> Result<String, AppError> {
        self.allocate_with(registry, || self.draw()).await
    }

    /// [`allocate`](Self::allocate) with an explicit candidate source.
    pub async fn allocate_with<R, G>(
        &self,
        registry: &mut R,
        mut next_candidate: G,
    ) -> Result<String, AppError>
    where
        R: CodeRegistry,
        G: FnMut() -> String,
    {
        for attempt in 1..=self.max_attempts {
            let candidate = next_candidate();
            if !registry.contains(&candidate).await? {
                if attempt > 1 {
                    tracing::debug!(attempt, length = self.format.length, "code allocated after collisions");
                }
                return Ok(candidate);
            }
        }

        tracing::error!(
            attempts = self.max_attempts,
            length = self.format.length,
            "no free code found within retry budget"
        );
        Err(AppError::AllocationExhausted)
    }

    /// Run `cycle` until it stops reporting an insert-time collision.
    ///
    /// `cycle` is one complete unit of work (begin, allocate, insert, commit)
    /// that maps the storage unique violation to `AppError::CodeCollision`.
    /// Any other outcome, success or error, is returned as is.
    pub async fn insert_unique<T, F, Fut>(&self, mut cycle: F) -> Result<T, AppError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        for attempt in 1..=self.insert_cycles {
            match cycle().await {
                Err(AppError::CodeCollision) => {
                    tracing::warn!(attempt, "generated code taken at insert time, retrying");
                }
                result => return result,
            }
        }

        tracing::error!(
            cycles = self.insert_cycles,
            "insert kept colliding on generated code"
        );
        Err(AppError::AllocationExhausted)
    }
}
