//! Bookkeeping structures shared by the policies.
mod frequency;
mod key_list;

pub(crate) use frequency::FrequencyBuckets;
pub(crate) use key_list::KeyList;
pub use key_list::Keys;
