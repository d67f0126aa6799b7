use rsz::rsz::{StringifyOptions, stringify};

use crate::cmd::json::instance_json;
use crate::cmd::util::{DataArgs, decode_data, emit_json, roots};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub data: DataArgs,
	#[arg(long)]
	pub json: bool,
}

/// Decode instances from a data file and print their root graphs.
pub fn run(args: Args) -> rsz::rsz::Result<()> {
	let Args { data, json } = args;
	let decoded = decode_data(&data)?;
	let roots = roots(&decoded.graph, &decoded.table)?;

	if json {
		let mut instances = Vec::with_capacity(roots.len());
		for id in &roots {
			instances.push(instance_json(&decoded.graph, *id)?);
		}
		let payload = DecodeJson {
			schema: data.schema.display().to_string(),
			data: data.data.display().to_string(),
			start: decoded.start,
			end: decoded.end,
			count: decoded.table.len(),
			resolved: decoded.resolved,
			instances,
		};
		return emit_json(&payload);
	}

	println!("data: {}", data.data.display());
	println!("bytes: {}..{}", decoded.start, decoded.end);
	println!("instances: {}", decoded.table.len());
	println!("resolved: {}", decoded.resolved);
	let table = (data.first_index == 0).then_some(decoded.table.as_slice());
	let options = StringifyOptions::default();
	for id in roots {
		println!();
		println!("{}", stringify(&decoded.graph, id, table, &options)?);
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct DecodeJson {
	schema: String,
	data: String,
	start: usize,
	end: usize,
	count: usize,
	resolved: bool,
	instances: Vec<serde_json::Value>,
}
