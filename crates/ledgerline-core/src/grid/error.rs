//! Grid errors

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by grid mutations
///
/// Validation never errors (invalid input is normalized silently) and empty
/// selections or update sets are no-ops, so the only failure a mutation can
/// surface is a rejected persistence call. Local state is guaranteed
/// untouched when one of these is returned.
#[derive(Error, Debug)]
pub enum GridError {
    /// A persistence collaborator rejected the mutation
    #[error("persistence error: {0}")]
    Persistence(#[from] StoreError),
}
