//! Resource model and registry.
//!
//! Resources are the workers jobs are assigned to. The registry is supplied
//! by the caller and is read-only to the normalizer: it never filters jobs,
//! it only reports references it does not know and buckets events into
//! per-worker lanes for rendering.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::{Event, Job};

/// A schedulable worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display color (e.g. `#87CEEB`), passed through to the renderer.
    pub color: Option<String>,
    /// Start and end point of the working day, for home legs.
    pub home_address: Option<String>,
    /// Domain-specific metadata.
    pub attributes: HashMap<String, String>,
}

impl Resource {
    /// Creates a resource.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            color: None,
            home_address: None,
            attributes: HashMap::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the home address.
    pub fn with_home_address(mut self, address: impl Into<String>) -> Self {
        self.home_address = Some(address.into());
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Events of one worker, in chronological order.
#[derive(Debug, Clone)]
pub struct Lane<'a> {
    pub resource: &'a Resource,
    pub events: Vec<&'a Event>,
}

/// Ordered list of schedulable workers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceRegistry {
    resources: Vec<Resource>,
}

impl ResourceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource; a later entry with the same id replaces the earlier one.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.insert(resource);
        self
    }

    /// Adds or replaces a resource, keeping its original position.
    pub fn insert(&mut self, resource: Resource) {
        match self.resources.iter_mut().find(|r| r.id == resource.id) {
            Some(existing) => *existing = resource,
            None => self.resources.push(resource),
        }
    }

    /// Looks up a resource.
    pub fn get(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Resource ids referenced by `jobs` that are not registered, sorted.
    pub fn unknown_resources(&self, jobs: &[Job]) -> Vec<String> {
        jobs.iter()
            .filter_map(Job::assigned_resource)
            .filter(|id| !self.contains(id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Buckets events per registered resource, in registry order.
    ///
    /// Each lane is sorted by start, then end, then id. Events of
    /// unregistered resources are left out.
    pub fn lanes<'a>(&'a self, events: &'a [Event]) -> Vec<Lane<'a>> {
        self.resources
            .iter()
            .map(|resource| {
                let mut lane: Vec<&Event> = events
                    .iter()
                    .filter(|e| e.resource_id() == Some(resource.id.as_str()))
                    .collect();
                lane.sort_by(|a, b| {
                    a.start()
                        .cmp(&b.start())
                        .then_with(|| a.end().cmp(&b.end()))
                        .then_with(|| a.id().cmp(b.id()))
                });
                Lane {
                    resource,
                    events: lane,
                }
            })
            .collect()
    }
}

impl FromIterator<Resource> for ResourceRegistry {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        let mut registry = Self::new();
        for resource in iter {
            registry.insert(resource);
        }
        registry
    }
}
