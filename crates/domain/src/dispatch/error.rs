use thiserror::Error;

use crate::alert::entity::AlertState;
use crate::alert::error::{PushError, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("store failed for alert {id}: {source}")]
    Store {
        id: String,
        #[source]
        source: StoreError,
    },

    #[error("push failed for alert {id}: {source}")]
    Push {
        id: String,
        #[source]
        source: PushError,
    },

    #[error("alert {id} has invalid state: {state}")]
    InvalidState { id: String, state: AlertState },
}
