/// Entry store errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store is over capacity and no slot can be freed (max_entries = {max_entries})")]
    OverCapacityUnrecoverable { max_entries: usize },
}
