use std::path::PathBuf;

use rsz::rsz::{
	Instance, InstanceGraph, RszError, Schema, StringifyOptions, Writer, create_instance, rebuild_table, resolve_references, stringify, write_table,
};

use crate::cmd::json::instance_json;
use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub schema: PathBuf,
	pub name: String,
	#[arg(long = "no-children")]
	pub no_children: bool,
	#[arg(long)]
	pub out: Option<PathBuf>,
	#[arg(long)]
	pub json: bool,
}

/// Build a default instance graph for one class and print or write it.
pub fn run(args: Args) -> rsz::rsz::Result<()> {
	let Args {
		schema: path,
		name,
		no_children,
		out,
		json,
	} = args;

	let schema = Schema::open(&path)?;
	let class = schema.get_by_name(&name).cloned().ok_or_else(|| RszError::SchemaNotFound { name: name.clone() })?;

	let mut graph = InstanceGraph::new();
	let root = create_instance(&schema, &mut graph, class, -1, !no_children)?;
	graph.get_mut(root)?.object_table_index = 0;

	// Children left uncreated point at slot 0.
	let null = graph.insert(Instance::null());
	let mut slots = vec![null];
	slots.extend(graph.iter().map(|(id, _)| id).filter(|id| *id != null));
	resolve_references(&mut graph, &slots)?;

	let table = rebuild_table(&mut graph, &[root])?;
	let mut writer = Writer::new();
	write_table(&graph, &table, &mut writer)?;
	let bytes = writer.into_bytes();
	if let Some(out) = &out {
		std::fs::write(out, &bytes)?;
	}

	if json {
		let mut classes = Vec::with_capacity(table.len());
		for id in &table {
			classes.push(graph.get(*id)?.class.name.to_string());
		}
		return emit_json(&CreateJson {
			class: name,
			classes,
			bytes: bytes.len(),
			out: out.map(|path| path.display().to_string()),
			root: instance_json(&graph, root)?,
		});
	}

	println!("{}", stringify(&graph, root, Some(table.as_slice()), &StringifyOptions::default())?);
	println!();
	println!("instances: {}", table.len());
	println!("bytes: {}", bytes.len());
	if let Some(out) = out {
		println!("wrote: {}", out.display());
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct CreateJson {
	class: String,
	classes: Vec<String>,
	bytes: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	out: Option<String>,
	root: serde_json::Value,
}
