use crate::id::SnowflakeId;

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `flakeid` can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested worker ID does not fit the 9-bit worker field.
    ///
    /// Returned at construction time. Not retryable without a corrected
    /// value.
    #[error("worker id {worker_id} is outside the valid range 0..={max}", max = SnowflakeId::WORKER_ID_MASK)]
    InvalidWorkerId {
        /// The rejected worker ID.
        worker_id: i64,
    },

    /// The wall clock is behind the timestamp of the last issued ID.
    ///
    /// Usually an NTP correction. Issuing anyway would risk duplicate or
    /// out-of-order IDs, so no ID is issued and no state is mutated.
    /// Retryable once the clock catches up to `last`; callers should back
    /// off rather than tight-loop, and treat repeated occurrences as an
    /// operational clock-sync problem worth alerting on.
    #[error("clock moved backwards: last issued at {last} ms, clock now reads {now} ms")]
    ClockMovedBackwards {
        /// Timestamp (ms since the epoch) of the most recently issued ID.
        last: i64,
        /// The regressed clock reading (ms since the epoch).
        now: i64,
    },
}
