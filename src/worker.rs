use parking_lot::Mutex;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    error::{Error, Result},
    id::SnowflakeId,
    time::{TimeSource, WallClock},
};

/// Mutable issuance state. The two fields are only ever read and updated
/// together, under the worker's lock.
struct State {
    last_timestamp: i64,
    sequence: i64,
}

/// A thread-safe snowflake ID worker, instantiated once per worker ID and
/// held for the life of the issuing process.
///
/// Every [`next_id`] call runs under a single exclusive lock, so concurrent
/// callers against one `Worker` always observe strictly increasing IDs. The
/// per-millisecond sequence counter yields up to 4096 IDs per worker per
/// millisecond with no shared state between workers; when the counter is
/// exhausted the call briefly spins until the clock advances.
///
/// Uniqueness across workers assumes each worker ID is held by at most one
/// live generator, enforced by whatever assigned the ID. State is in-memory
/// only: a process restarting within the same millisecond, with a clock that
/// did not advance, can reissue sequence numbers for that millisecond.
///
/// # Example
///
/// ```
/// use flakeid::Worker;
///
/// let worker = Worker::new(8)?;
/// let a = worker.next_id()?;
/// let b = worker.next_id()?;
/// assert!(a < b);
/// # Ok::<(), flakeid::Error>(())
/// ```
///
/// [`next_id`]: Worker::next_id
pub struct Worker<T = WallClock>
where
    T: TimeSource,
{
    worker_id: i64,
    state: Mutex<State>,
    time: T,
}

impl Worker<WallClock> {
    /// Creates a worker backed by the system wall clock anchored to
    /// [`DEFAULT_EPOCH`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkerId`] if `worker_id` is outside
    /// `0..=511`.
    ///
    /// [`DEFAULT_EPOCH`]: crate::DEFAULT_EPOCH
    pub fn new(worker_id: i64) -> Result<Self> {
        Self::with_time_source(worker_id, WallClock::default())
    }
}

impl<T> Worker<T>
where
    T: TimeSource,
{
    /// Creates a worker with an explicit [`TimeSource`].
    ///
    /// Useful for anchoring IDs to a custom epoch
    /// ([`WallClock::with_epoch`]) or injecting a mock clock in tests.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkerId`] if `worker_id` is outside
    /// `0..=511`.
    ///
    /// [`WallClock::with_epoch`]: crate::WallClock::with_epoch
    pub fn with_time_source(worker_id: i64, time: T) -> Result<Self> {
        if worker_id < 0 || worker_id > SnowflakeId::WORKER_ID_MASK {
            return Err(Error::InvalidWorkerId { worker_id });
        }
        Ok(Self {
            worker_id,
            state: Mutex::new(State {
                last_timestamp: 0,
                sequence: 0,
            }),
            time,
        })
    }

    /// Returns the worker ID encoded into every issued identifier.
    pub const fn worker_id(&self) -> i64 {
        self.worker_id
    }

    /// Issues the next ID.
    ///
    /// Safe to call from any number of threads against the same worker. The
    /// only blocking point is sequence exhaustion: once 4096 IDs have been
    /// issued within one millisecond, the call spins until the clock moves
    /// past it (normally sub-millisecond, unbounded if the clock stalls;
    /// callers needing a deadline must impose it externally).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockMovedBackwards`] if the clock reads earlier
    /// than the timestamp of the last issued ID. No ID is issued and no
    /// state is mutated; retry once the clock catches up.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<SnowflakeId> {
        let mut state = self.state.lock();
        let mut now = self.time.current_millis();

        if now < state.last_timestamp {
            return Err(Self::cold_clock_behind(state.last_timestamp, now));
        }

        if now == state.last_timestamp {
            state.sequence = (state.sequence + 1) & SnowflakeId::SEQUENCE_MASK;
            if state.sequence == 0 {
                // Sequence space for this millisecond is spent.
                now = self.wait_next_millis(state.last_timestamp);
            }
        } else {
            state.sequence = 0;
        }
        state.last_timestamp = now;

        Ok(SnowflakeId::from_parts(now, self.worker_id, state.sequence))
    }

    /// Packs an explicit timestamp and sequence with this worker's ID.
    ///
    /// A deterministic encoder for tests and backfill. It uses the same
    /// layout as [`next_id`] but never touches issuance state: the sequence
    /// argument is masked to 12 bits and encoded as given.
    ///
    /// [`next_id`]: Worker::next_id
    pub const fn fixed_id(&self, timestamp: i64, sequence: i64) -> SnowflakeId {
        SnowflakeId::from_parts(timestamp, self.worker_id, sequence)
    }

    /// Splits an ID this worker minted into `(timestamp, worker_id,
    /// sequence)`.
    ///
    /// The worker ID is this worker's own, not extracted from the ID; for an
    /// ID of unknown origin use the [`SnowflakeId`] accessors instead.
    pub const fn break_down(&self, id: SnowflakeId) -> (i64, i64, i64) {
        (id.timestamp(), self.worker_id, id.sequence())
    }

    /// Spins until the clock reads strictly later than `last`.
    fn wait_next_millis(&self, last: i64) -> i64 {
        let mut now = self.time.current_millis();
        while now <= last {
            core::hint::spin_loop();
            now = self.time.current_millis();
        }
        now
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(last: i64, now: i64) -> Error {
        Error::ClockMovedBackwards { last, now }
    }
}
