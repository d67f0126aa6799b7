use std::fmt;

use crate::rsz::{Instance, Result, RszError};

/// Ceiling on recursive traversal depth for graph operations.
///
/// Acyclic graphs from real files nest far below this; hitting it almost
/// always means a cycle reached a traversal that does not track visits.
pub const MAX_GRAPH_DEPTH: u32 = 1024;

/// Handle of an instance inside an `InstanceGraph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u32);

impl InstanceId {
	/// Arena slot of this handle.
	pub fn slot(self) -> usize {
		self.0 as usize
	}
}

impl fmt::Display for InstanceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Arena owning every instance of one graph.
///
/// References between instances are `InstanceId` handles, so sharing is two
/// slots holding the same handle and cycles need no ownership tricks.
#[derive(Debug, Clone, Default)]
pub struct InstanceGraph {
	instances: Vec<Instance>,
}

impl InstanceGraph {
	/// Create an empty arena.
	pub fn new() -> Self {
		Self::default()
	}

	/// Move an instance into the arena.
	pub fn insert(&mut self, instance: Instance) -> InstanceId {
		let id = InstanceId(u32::try_from(self.instances.len()).unwrap_or(u32::MAX));
		self.instances.push(instance);
		id
	}

	/// Borrow an instance.
	pub fn get(&self, id: InstanceId) -> Result<&Instance> {
		self.instances.get(id.slot()).ok_or(RszError::DanglingInstance { id: id.0 })
	}

	/// Borrow an instance mutably.
	pub fn get_mut(&mut self, id: InstanceId) -> Result<&mut Instance> {
		self.instances.get_mut(id.slot()).ok_or(RszError::DanglingInstance { id: id.0 })
	}

	/// Handle the instance staged `offset` slots past the current end will get.
	pub(crate) fn staged_id(&self, offset: usize) -> InstanceId {
		InstanceId(u32::try_from(self.instances.len() + offset).unwrap_or(u32::MAX))
	}

	/// Append staged instances; their handles match `staged_id` taken before the call.
	pub(crate) fn commit(&mut self, staged: Vec<Instance>) {
		self.instances.extend(staged);
	}

	/// Number of instances in the arena.
	pub fn len(&self) -> usize {
		self.instances.len()
	}

	/// Whether the arena is empty.
	pub fn is_empty(&self) -> bool {
		self.instances.is_empty()
	}

	/// Iterate handles and instances in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (InstanceId, &Instance)> {
		self.instances.iter().enumerate().map(|(slot, instance)| (InstanceId(slot as u32), instance))
	}
}
