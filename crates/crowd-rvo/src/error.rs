use thiserror::Error;

use crowd_core::SlotId;

#[derive(Debug, Error)]
pub enum RvoError {
    #[error("slot {slot} out of range (solver has {len} slots)")]
    SlotOutOfRange { slot: SlotId, len: usize },
}

pub type RvoResult<T> = Result<T, RvoError>;
