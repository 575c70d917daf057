//! Ideal implementations of the OT protocols.
//!
//! Payloads are passed out-of-band through an in-memory channel, so both halves of a pair must
//! live in the same process.

mod ot;
mod rot;

pub use ot::{ideal_ot_pair, IdealOTReceiver, IdealOTSender};
pub use rot::{ideal_random_ot_pair, IdealRandomOTReceiver, IdealRandomOTSender};
