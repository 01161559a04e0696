//! Per-run name lookups over existing destination nodes.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

use crate::sync::{
    domain::{NameIndex, NodeId},
    ports::{DestinationClient, DestinationResult},
};

/// Builds and caches [`NameIndex`] values for one clone request.
///
/// Each parent is listed at most once per run. Nodes created during the run
/// are recorded in the cached index so later issues reuse them without a
/// second listing. The cache is dropped with the value at the end of the run.
pub struct TaskNameIndex<'a, D: DestinationClient> {
    destination: &'a D,
    projects: Option<NameIndex>,
    children: HashMap<NodeId, NameIndex>,
}

impl<'a, D: DestinationClient> TaskNameIndex<'a, D> {
    /// Creates an empty cache over a destination.
    #[must_use]
    pub fn new(destination: &'a D) -> Self {
        Self {
            destination,
            projects: None,
            children: HashMap::new(),
        }
    }

    /// Lists the direct children of `parent_id` and indexes them by name.
    ///
    /// This always queries the destination and does not touch the cache.
    ///
    /// # Errors
    ///
    /// Returns the destination error when listing fails.
    pub async fn build(&self, parent_id: &NodeId) -> DestinationResult<NameIndex> {
        index_children(self.destination, parent_id).await
    }

    /// Looks a name up in an index.
    #[must_use]
    pub fn lookup<'i>(index: &'i NameIndex, name: &str) -> Option<&'i NodeId> {
        index.lookup(name)
    }

    /// Returns the cached project index, listing projects on first use.
    ///
    /// # Errors
    ///
    /// Returns the destination error when listing fails.
    pub async fn projects(&mut self) -> DestinationResult<&mut NameIndex> {
        if self.projects.is_none() {
            let projects = self.destination.list_projects().await?;
            debug!(projects = projects.len(), "indexed projects");
            self.projects = Some(NameIndex::from_nodes(&projects));
        }
        Ok(self.projects.get_or_insert_with(NameIndex::new))
    }

    /// Returns the cached child index of `parent_id`, listing it on first use.
    ///
    /// # Errors
    ///
    /// Returns the destination error when listing fails.
    pub async fn children(&mut self, parent_id: &NodeId) -> DestinationResult<&mut NameIndex> {
        let destination = self.destination;
        match self.children.entry(parent_id.clone()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(index_children(destination, parent_id).await?)),
        }
    }
}

async fn index_children<D: DestinationClient>(
    destination: &D,
    parent_id: &NodeId,
) -> DestinationResult<NameIndex> {
    let children = destination.list_child_tasks(parent_id).await?;
    let index = NameIndex::from_nodes(&children);
    debug!(%parent_id, children = index.len(), "indexed child tasks");
    Ok(index)
}
