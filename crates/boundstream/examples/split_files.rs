//! Split a file into numbered parts at each delimiter, or join files into one.
//!
//! ```text
//! cargo run --example split_files -- split <input> <out-dir>
//! cargo run --example split_files -- join <output> <input>...
//! ```
#![allow(missing_docs)]

use std::{
    env,
    fs::{self, File},
    io::{self, BufWriter},
    path::Path,
    process::ExitCode,
};

use boundstream::{BoundaryReader, BoundaryWriter, IoSink, IoSource};

fn split(input: &Path, out_dir: &Path) -> io::Result<usize> {
    fs::create_dir_all(out_dir)?;
    let mut reader = BoundaryReader::new(IoSource::new(File::open(input)?));
    let mut substreams = reader.substreams();
    let mut parts = 0;
    while let Some(substream) = substreams.next() {
        let mut out = BufWriter::new(File::create(out_dir.join(format!("part-{parts:04}")))?);
        io::copy(&mut substream?, &mut out)?;
        parts += 1;
    }
    Ok(parts)
}

fn join(output: &Path, inputs: &[String]) -> io::Result<usize> {
    let mut writer = BoundaryWriter::new(IoSink::new(BufWriter::new(File::create(output)?)));
    for input in inputs {
        io::copy(&mut File::open(input)?, &mut writer)?;
        writer.delimiter()?;
    }
    writer.close()?;
    Ok(inputs.len())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.as_slice() {
        [cmd, input, out_dir] if cmd == "split" => split(input.as_ref(), out_dir.as_ref()),
        [cmd, output, inputs @ ..] if cmd == "join" && !inputs.is_empty() => {
            join(output.as_ref(), inputs)
        }
        _ => {
            eprintln!("usage: split_files split <input> <out-dir> | join <output> <input>...");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(parts) => {
            println!("{parts} parts");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
