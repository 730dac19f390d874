//! Coordination-free, time-ordered 64-bit worker IDs.
//!
//! Each issuing node is assigned a distinct worker ID out of band (static
//! config, a coordination service, whatever fits your deployment). From then
//! on its [`Worker`] mints IDs unilaterally: no network round-trips, up to
//! 4096 IDs per millisecond, strictly increasing for as long as the wall
//! clock never regresses.
//!
//! IDs are packed into a non-negative `i64`, MSB first:
//!
//! ```text
//!  Bit Index:  63           63 62            21 20            12 11             0
//!              +--------------+----------------+----------------+---------------+
//!  Field:      | reserved (1) | timestamp (42) | worker ID (9)  | sequence (12) |
//!              +--------------+----------------+----------------+---------------+
//!              |<----------- MSB ---------- 64 bits ----------- LSB ----------->|
//! ```
//!
//! The timestamp is milliseconds since the Unix epoch by default; see
//! [`WallClock::with_epoch`] to anchor it elsewhere.
//!
//! # Example
//!
//! ```
//! use flakeid::Worker;
//!
//! let worker = Worker::new(8)?;
//! let id = worker.next_id()?;
//! assert_eq!(id.worker_id(), 8);
//! # Ok::<(), flakeid::Error>(())
//! ```
//!
//! # Caveats
//!
//! - Uniqueness across nodes relies on each worker ID being held by at most
//!   one live process. This crate does not detect duplicate worker IDs.
//! - Issuance state is in-memory only. A process that restarts within the
//!   same millisecond, with a clock that did not advance, can reissue
//!   sequence numbers for that millisecond.

mod error;
mod id;
mod time;
mod worker;

pub use crate::error::*;
pub use crate::id::*;
pub use crate::time::*;
pub use crate::worker::*;
