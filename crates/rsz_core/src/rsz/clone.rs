use std::collections::HashMap;
use std::sync::Arc;

use crate::rsz::graph::MAX_GRAPH_DEPTH;
use crate::rsz::{FieldValue, Instance, InstanceGraph, InstanceId, Result, RszError, Value};

/// Source-to-clone mapping for one sharing-preserving clone session.
///
/// Keys are handles in the source graph. Clear the cache between unrelated
/// clone operations, and never share one cache between concurrent sessions.
#[derive(Debug, Default)]
pub struct CloneCache {
	map: HashMap<InstanceId, InstanceId>,
}

impl CloneCache {
	/// Create an empty session cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Forget every recorded clone.
	pub fn clear(&mut self) {
		self.map.clear();
	}

	/// Clone already produced for a source handle.
	pub fn get(&self, source: InstanceId) -> Option<InstanceId> {
		self.map.get(&source).copied()
	}

	/// Number of recorded clones.
	pub fn len(&self) -> usize {
		self.map.len()
	}

	/// Whether nothing has been cloned in this session.
	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}
}

/// Deep-copy an instance within its own graph, duplicating shared children.
///
/// Every reachable reference gets a fresh copy. The source must be acyclic;
/// a cycle fails with `GraphDepthExceeded`. On error the graph is unchanged.
pub fn clone_instance(graph: &mut InstanceGraph, source: InstanceId) -> Result<InstanceId> {
	clone_impl(None, graph, source, None)
}

/// Deep-copy an instance within its own graph, preserving sharing and cycles.
///
/// Two slots that referenced the same source instance reference the same
/// clone afterwards. On error neither the graph nor the cache changes.
pub fn clone_instance_cached(graph: &mut InstanceGraph, source: InstanceId, cache: &mut CloneCache) -> Result<InstanceId> {
	clone_impl(None, graph, source, Some(cache))
}

/// Deep-copy an instance from one graph into another.
pub fn clone_into(source_graph: &InstanceGraph, source: InstanceId, dest: &mut InstanceGraph, cache: Option<&mut CloneCache>) -> Result<InstanceId> {
	clone_impl(Some(source_graph), dest, source, cache)
}

/// Copies allocated so far, kept off the arena until the whole pass succeeds.
struct Staging<'a> {
	source_graph: Option<&'a InstanceGraph>,
	dest: &'a InstanceGraph,
	cached: bool,
	prior: Option<&'a CloneCache>,
	fresh: HashMap<InstanceId, InstanceId>,
	copies: Vec<Instance>,
	// (staged slot, depth) whose reference values still point into the source
	pending: Vec<(usize, u32)>,
}

impl Staging<'_> {
	fn source(&self, id: InstanceId) -> Result<&Instance> {
		self.source_graph.unwrap_or(self.dest).get(id)
	}

	fn allocate(&mut self, source: InstanceId, depth: u32) -> Result<InstanceId> {
		if self.cached {
			if let Some(hit) = self.fresh.get(&source).copied().or_else(|| self.prior.and_then(|cache| cache.get(source))) {
				return Ok(hit);
			}
		}
		if depth >= MAX_GRAPH_DEPTH {
			return Err(RszError::GraphDepthExceeded { max_depth: MAX_GRAPH_DEPTH });
		}

		let original = self.source(source)?;
		let copy = Instance {
			class: Arc::clone(&original.class),
			index: -1,
			object_table_index: original.object_table_index,
			values: original.values.clone(),
			user_data: original.user_data.clone(),
		};
		let id = self.dest.staged_id(self.copies.len());
		self.pending.push((self.copies.len(), depth));
		self.copies.push(copy);
		if self.cached {
			self.fresh.insert(source, id);
		}
		Ok(id)
	}

	fn remap(&mut self, slot: usize, depth: u32) -> Result<()> {
		let class = Arc::clone(&self.copies[slot].class);
		let mut values = std::mem::take(&mut self.copies[slot].values);
		for (field, field_value) in class.fields.iter().zip(values.iter_mut()) {
			if !field.is_reference() {
				continue;
			}
			for value in field_value.values_mut() {
				if let Value::Instance(child) = *value {
					*value = Value::Instance(self.allocate(child, depth + 1)?);
				}
			}
		}
		self.copies[slot].values = values;
		Ok(())
	}
}

// `source_graph == None` means the source lives in `dest`; staged copies are never read as sources.
fn clone_impl(source_graph: Option<&InstanceGraph>, dest: &mut InstanceGraph, source: InstanceId, cache: Option<&mut CloneCache>) -> Result<InstanceId> {
	let (root, copies, fresh) = {
		let mut staging = Staging {
			source_graph,
			dest: &*dest,
			cached: cache.is_some(),
			prior: cache.as_deref(),
			fresh: HashMap::new(),
			copies: Vec::new(),
			pending: Vec::new(),
		};
		let root = staging.allocate(source, 0)?;
		while let Some((slot, depth)) = staging.pending.pop() {
			staging.remap(slot, depth)?;
		}
		(root, staging.copies, staging.fresh)
	};

	dest.commit(copies);
	if let Some(cache) = cache {
		cache.map.extend(fresh);
	}
	Ok(root)
}

/// Whether two slots hold structurally equal values, following references.
pub fn structurally_equal(graph: &InstanceGraph, left: InstanceId, right: InstanceId) -> Result<bool> {
	let mut pending = vec![(left, right, 0_u32)];
	while let Some((left, right, depth)) = pending.pop() {
		if left == right {
			continue;
		}
		if depth >= MAX_GRAPH_DEPTH {
			return Err(RszError::GraphDepthExceeded { max_depth: MAX_GRAPH_DEPTH });
		}

		let a = graph.get(left)?;
		let b = graph.get(right)?;
		if !Arc::ptr_eq(&a.class, &b.class) || a.user_data != b.user_data || a.values.len() != b.values.len() {
			return Ok(false);
		}

		for (slot_a, slot_b) in a.values.iter().zip(b.values.iter()) {
			let same_shape = matches!((slot_a, slot_b), (FieldValue::Single(_), FieldValue::Single(_)) | (FieldValue::Array(_), FieldValue::Array(_)));
			if !same_shape || slot_a.values().len() != slot_b.values().len() {
				return Ok(false);
			}
			for (va, vb) in slot_a.values().zip(slot_b.values()) {
				match (va, vb) {
					(Value::Instance(ca), Value::Instance(cb)) => pending.push((*ca, *cb, depth + 1)),
					_ if va != vb => return Ok(false),
					_ => {}
				}
			}
		}
	}
	Ok(true)
}
