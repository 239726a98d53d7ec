//! Compile the meta-shader repertoire and dump the results.
//!
//! By default every operation in the catalog is compiled and listed as a
//! per-instruction hex dump. A single operation can be selected by name, and
//! `--object` writes the programs into an ELF object instead so the usual
//! binutils can pick them apart.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use genmeta::meta::build_object;
use genmeta::{compile_meta_shader, GpuDescriptor, MetaOp, MetaShader, GEN75};

#[derive(Parser)]
#[command(name = "metadump", version, about = "Compile and dump meta shaders")]
struct Args {
    /// Operation to compile (e.g. clear-color); omit for the whole catalog
    op: Option<MetaOp>,

    /// Hardware generation to compile for (600, 700 or 750)
    #[arg(long = "gen", default_value_t = GEN75)]
    gen: u32,

    /// GT level of the part
    #[arg(long, default_value_t = 2)]
    gt: u8,

    /// List the catalog and exit
    #[arg(long)]
    list: bool,

    /// Write the programs into an ELF object at this path
    #[arg(long, value_name = "PATH")]
    object: Option<PathBuf>,
}

fn family(op: MetaOp) -> &'static str {
    if op.is_clear() {
        "clear"
    } else if op.is_sampling_copy() {
        "copy"
    } else if op.is_copy_to_mem() {
        "copy to memory"
    } else if op.is_resolve() {
        "resolve"
    } else {
        "upload"
    }
}

fn list_catalog() {
    for op in MetaOp::ALL {
        let status = if op.has_dedicated_sequence() {
            ""
        } else {
            " (constant fill)"
        };
        println!("{:<22} {}{}", op.name(), family(op), status);
    }
}

fn mnemonic(dw0: u32) -> &'static str {
    match dw0 & 0x7f {
        0x01 => "mov",
        0x40 => "add",
        0x31 => "send",
        _ => "?",
    }
}

fn print_program(shader: &MetaShader) {
    println!(
        "{}: {} instructions, {} bytes, push constants at r{}{}",
        shader.op,
        shader.instruction_count(),
        shader.code.len(),
        shader.metadata.first_push_constant_grf,
        if shader.metadata.writes_depth {
            ", writes depth"
        } else {
            ""
        },
    );
    for (index, inst) in shader.code.chunks_exact(16).enumerate() {
        let words: Vec<u32> = inst
            .chunks_exact(4)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        println!(
            "  [{:02}] {:<4} {:08x} {:08x} {:08x} {:08x}",
            index,
            mnemonic(words[0]),
            words[0],
            words[1],
            words[2],
            words[3]
        );
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.list {
        list_catalog();
        return Ok(());
    }

    let gpu = GpuDescriptor::new(args.gen, args.gt);
    let ops: Vec<MetaOp> = match args.op {
        Some(op) => vec![op],
        None => MetaOp::ALL.to_vec(),
    };

    let mut shaders = Vec::with_capacity(ops.len());
    for op in ops {
        shaders.push(compile_meta_shader(&gpu, op)?);
    }

    if let Some(path) = &args.object {
        let bytes = build_object(&shaders)?;
        fs::write(path, bytes)?;
        println!("wrote {} programs to {}", shaders.len(), path.display());
        return Ok(());
    }

    for shader in &shaders {
        print_program(shader);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
