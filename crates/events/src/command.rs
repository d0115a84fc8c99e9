use storefront_core::AggregateId;

/// A command targets a specific aggregate.
///
/// Commands represent **intent** (e.g. "put this product on sale"). They are
/// transient and are turned into events by the aggregate's `handle`.
///
/// Commands must own their data and be cheap to clone so they can be retried
/// or logged.
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn target_aggregate_id(&self) -> AggregateId;
}
