//! Image resource bookkeeping.
//!
//! Loading happens outside the engine. The engine only records which
//! resources it wants and what became of them, and every consumer polls
//! [`Assets::status`] once per frame.

use derive_more::{AsRef, Deref, Display, From, Into};
use std::collections::{HashMap, VecDeque};
use strum::Display as StrumDisplay;

/// Number of distinct card images; card `i` uses `img{(i % 10) + 1}.jpg`.
pub const IMAGE_COUNT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct ResourceRef(String);

crate::impl_string_newtype!(ResourceRef);

impl ResourceRef {
    pub fn for_index(index: usize) -> Self {
        Self(format!("img{}.jpg", (index % IMAGE_COUNT) + 1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum ResourceStatus {
    #[default]
    Pending,
    Ready,
    Failed,
}

impl ResourceStatus {
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

#[derive(Debug, Default)]
pub struct Assets {
    status: HashMap<ResourceRef, ResourceStatus>,
    queue: VecDeque<ResourceRef>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers interest in `resource`. Only the first request queues a load.
    pub fn request(&mut self, resource: &ResourceRef) -> ResourceStatus {
        if let Some(status) = self.status.get(resource) {
            return *status;
        }
        self.status.insert(resource.clone(), ResourceStatus::Pending);
        self.queue.push_back(resource.clone());
        ResourceStatus::Pending
    }

    /// Hands queued loads to the loader.
    pub fn drain_requests(&mut self) -> Vec<ResourceRef> {
        self.queue.drain(..).collect()
    }

    /// Records a load outcome. The first settled outcome is final; nothing is
    /// retried after a failure.
    pub fn resolve(&mut self, resource: &ResourceRef, loaded: bool) -> ResourceStatus {
        let entry = self
            .status
            .entry(resource.clone())
            .or_insert(ResourceStatus::Pending);
        if !entry.is_settled() {
            *entry = if loaded {
                ResourceStatus::Ready
            } else {
                log::warn!("Resource '{}' failed to load", resource);
                ResourceStatus::Failed
            };
        }
        *entry
    }

    pub fn status(&self, resource: &ResourceRef) -> ResourceStatus {
        self.status.get(resource).copied().unwrap_or_default()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naming_wraps_every_ten() {
        assert_eq!(ResourceRef::for_index(0).as_str(), "img1.jpg");
        assert_eq!(ResourceRef::for_index(9).as_str(), "img10.jpg");
        assert_eq!(ResourceRef::for_index(10).as_str(), "img1.jpg");
        assert_eq!(ResourceRef::for_index(47).as_str(), "img8.jpg");
    }

    #[test]
    fn test_requests_are_deduplicated() {
        let mut assets = Assets::new();
        let a = ResourceRef::for_index(0);
        let b = ResourceRef::for_index(10);
        assets.request(&a);
        assets.request(&b);
        assets.request(&ResourceRef::for_index(1));
        assert_eq!(assets.drain_requests().len(), 2);
        assert!(assets.drain_requests().is_empty());
        assert_eq!(assets.status(&a), ResourceStatus::Pending);
        assert_eq!(assets.status(&b), ResourceStatus::Pending);
    }

    #[test]
    fn test_failure_is_permanent() {
        let mut assets = Assets::new();
        let r = ResourceRef::new("img3.jpg");
        assets.request(&r);
        assert_eq!(assets.resolve(&r, false), ResourceStatus::Failed);
        assert_eq!(assets.resolve(&r, true), ResourceStatus::Failed);
        assert_eq!(assets.request(&r), ResourceStatus::Failed);
        assert!(assets.drain_requests().len() == 1);
    }

    #[test]
    fn test_unknown_resource_is_pending() {
        let assets = Assets::new();
        assert_eq!(
            assets.status(&ResourceRef::new("missing.jpg")),
            ResourceStatus::Pending
        );
    }
}
