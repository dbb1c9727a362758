//! Signing module
//!
//! Each signer MACs the data with its own key; an aggregator then XOR-folds
//! the per-key signatures into one [`CombinedSignature`](crate::CombinedSignature).

mod combine;
mod signer;

pub use combine::combine;
pub use signer::sign;

pub(crate) use combine::xor_into;
