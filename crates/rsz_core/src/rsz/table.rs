use std::collections::HashSet;
use std::sync::Arc;

use crate::rsz::bytes::{Cursor, Writer};
use crate::rsz::flatten::Flatten;
use crate::rsz::{Instance, InstanceGraph, InstanceId, ReadOptions, Result, RszClass, RszError, Value, read_instance, write_instance};

/// Read instances of `classes` back to back, assigning consecutive table indices.
///
/// NULL classes consume no bytes. Returns the new handles in table order.
pub fn read_instances(graph: &mut InstanceGraph, classes: &[Arc<RszClass>], cursor: &mut Cursor<'_>, first_index: i32, options: &ReadOptions) -> Result<Vec<InstanceId>> {
	let mut ids = Vec::with_capacity(classes.len());
	for (offset, class) in classes.iter().enumerate() {
		let index = first_index.saturating_add(i32::try_from(offset).unwrap_or(i32::MAX));
		let mut instance = Instance::new(Arc::clone(class), index);
		if !class.is_null() {
			read_instance(&mut instance, cursor, options)?;
		}
		ids.push(graph.insert(instance));
	}
	Ok(ids)
}

/// Replace raw table indices in reference fields with handles from `table`.
///
/// Every index is checked before anything is rewritten, so on error the
/// graph is unchanged.
pub fn resolve_references(graph: &mut InstanceGraph, table: &[InstanceId]) -> Result<()> {
	let mut patches = Vec::new();
	for &id in table {
		let instance = graph.get(id)?;
		for (slot_idx, (field, slot)) in instance.fields().enumerate() {
			if !field.is_reference() {
				continue;
			}
			for (elem_idx, value) in slot.values().enumerate() {
				let Value::Index(raw) = *value else {
					continue;
				};
				let target = usize::try_from(raw)
					.ok()
					.and_then(|slot| table.get(slot))
					.ok_or(RszError::TableIndexOutOfRange { index: raw, len: table.len() })?;
				patches.push((id, slot_idx, elem_idx, *target));
			}
		}
	}

	for (id, slot_idx, elem_idx, target) in patches {
		let instance = graph.get_mut(id)?;
		if let Some(value) = instance.values.get_mut(slot_idx).and_then(|slot| slot.values_mut().nth(elem_idx)) {
			*value = Value::Instance(target);
		}
	}
	Ok(())
}

/// Linearize the graphs under `roots` into a write-ready instance table.
///
/// Each root is flattened in order; an instance reached more than once keeps
/// its first post-order position. Existing NULL instances are dropped and a
/// fresh one takes slot 0. Every listed instance gets `index` set to its slot.
pub fn rebuild_table(graph: &mut InstanceGraph, roots: &[InstanceId]) -> Result<Vec<InstanceId>> {
	let mut seen = HashSet::new();
	let mut order = Vec::new();
	let mut nulls = Vec::new();
	for &root in roots {
		for id in Flatten::new(graph, root) {
			let id = id?;
			if !seen.insert(id) {
				continue;
			}
			if graph.get(id)?.is_null() {
				nulls.push(id);
			} else {
				order.push(id);
			}
		}
	}

	let mut table = Vec::with_capacity(order.len() + 1);
	table.push(graph.insert(Instance::null()));
	table.extend(order);

	for id in nulls {
		graph.get_mut(id)?.index = 0;
	}
	for (slot, &id) in table.iter().enumerate() {
		graph.get_mut(id)?.index = i32::try_from(slot).map_err(|_| RszError::InvalidArgument {
			name: "table",
			value: format!("{} instances", table.len()),
		})?;
	}
	tracing::debug!(roots = roots.len(), instances = table.len(), "rebuilt instance table");
	Ok(table)
}

/// Encode every non-NULL instance of `table` back to back.
pub fn write_table(graph: &InstanceGraph, table: &[InstanceId], writer: &mut Writer) -> Result<()> {
	for &id in table {
		let instance = graph.get(id)?;
		if instance.is_null() {
			continue;
		}
		write_instance(graph, instance, writer)?;
	}
	Ok(())
}

#[cfg(test)]
mod tests;
