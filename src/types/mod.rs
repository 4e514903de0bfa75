//! Account envelopes and change events shared by the RPC, decoder and state layers.

pub mod accounts;
pub mod events;

pub use accounts::{KeyedAccount, ParsedAccount};
pub use events::{ChangeEvent, StateProp};
