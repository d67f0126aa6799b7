use rsz::rsz::{RszError, Writer, write_table};

use crate::cmd::util::{DataArgs, decode_data, emit_json};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub data: DataArgs,
	#[arg(long)]
	pub json: bool,
}

/// Decode instances, re-encode them, and compare against the source bytes.
pub fn run(args: Args) -> rsz::rsz::Result<()> {
	let Args { data, json } = args;
	let decoded = decode_data(&data)?;

	let mut writer = Writer::new();
	writer.seek(decoded.start);
	write_table(&decoded.graph, &decoded.table, &mut writer)?;

	let original = &decoded.bytes[decoded.start..decoded.end];
	let written = &writer.bytes()[decoded.start..];
	let mismatch = first_mismatch(original, written).map(|at| decoded.start + at);

	if json {
		emit_json(&RoundTripJson {
			data: data.data.display().to_string(),
			start: decoded.start,
			end: decoded.end,
			instances: decoded.table.len(),
			written: written.len(),
			matches: mismatch.is_none(),
			mismatch_at: mismatch,
		})?;
	} else {
		println!("data: {}", data.data.display());
		println!("instances: {}", decoded.table.len());
		println!("read: {} bytes", original.len());
		println!("written: {} bytes", written.len());
		match mismatch {
			Some(at) => println!("result: mismatch at {at}"),
			None => println!("result: identical"),
		}
	}

	match mismatch {
		Some(at) => Err(RszError::RoundTripMismatch { at }),
		None => Ok(()),
	}
}

fn first_mismatch(original: &[u8], written: &[u8]) -> Option<usize> {
	let common = original.len().min(written.len());
	original
		.iter()
		.zip(written)
		.position(|(a, b)| a != b)
		.or((original.len() != written.len()).then_some(common))
}

#[derive(serde::Serialize)]
struct RoundTripJson {
	data: String,
	start: usize,
	end: usize,
	instances: usize,
	written: usize,
	matches: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	mismatch_at: Option<usize>,
}
