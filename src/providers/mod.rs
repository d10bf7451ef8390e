//! Production implementations of relay trait abstractions.
//!
//! The contract gateways in [`crate::contracts`] are the production side of
//! the gateway traits; this module holds the remaining real implementations,
//! currently just the system clock. Test code substitutes the fakes from
//! [`crate::testing`].

mod tokio_clock;

pub use self::tokio_clock::TokioClock;
