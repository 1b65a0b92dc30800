//! Domain layer types and invariants.

pub mod entities;
pub mod naming;
pub mod slug;
pub mod storage;
