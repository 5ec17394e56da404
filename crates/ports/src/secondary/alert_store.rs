use std::future::Future;
use std::pin::Pin;

use domain::alert::entity::CanonicalAlert;
use domain::alert::error::StoreError;

/// Boxed future returned by store operations.
pub type StoreFuture<'a> = Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>>;

/// Secondary port for persisting triggered alerts and removing resolved ones.
///
/// Uses `Pin<Box<dyn Future>>` return types so the trait is dyn-compatible
/// and the dispatch engine can hold it as `Arc<dyn AlertStore>`.
///
/// Backends report an existing key on `add` as `DuplicateId` and a missing
/// key on `delete` as `NotFound`; callers treat both as failures and never
/// retry.
pub trait AlertStore: Send + Sync {
    /// Create the record for `id`.
    fn add<'a>(&'a self, id: &'a str, alert: &'a CanonicalAlert) -> StoreFuture<'a>;

    /// Remove the record for `id`.
    fn delete<'a>(&'a self, id: &'a str) -> StoreFuture<'a>;
}
