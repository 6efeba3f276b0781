use crate::lookup::SpatialLookup;
use crate::models::Node;

/// Resolves the starting node of an exploration query.
///
/// Either a pinned node (an explicit lock that persists across calls) or a transient target that is
/// recomputed on every call. Resolution must be cheap and must not mutate anything the estimator
/// observes.
pub trait OriginSelector {
    fn resolve(&self, lookup: &dyn SpatialLookup) -> Option<Node>;
}

impl<T: OriginSelector + ?Sized> OriginSelector for &T {
    fn resolve(&self, lookup: &dyn SpatialLookup) -> Option<Node> {
        (**self).resolve(lookup)
    }
}
