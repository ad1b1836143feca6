//! tessa command-line interface.
//!
//! Reads a WKT polygon (or a geometry collection of a polygon and a
//! multi-line-string) from a file or stdin and writes the labeled graph to
//! a file or stdout. Diagnostics go to stderr.
//!
//! Exit status: 0 on success, 2 when the input cannot be parsed, 1 on I/O
//! failure.

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use tessa::io::parse_wkt;
use tessa::kernel::{DEFAULT_SHAPE_BOUND, MeshCriteria};
use tessa::mesh_error::MeshError;
use tessa::pipeline::{PipelineOptions, process_input};

/// Triangulate a polygon with holes and roads into a labeled graph.
#[derive(Parser, Debug)]
#[command(name = "tessa", version, about, long_about = None)]
struct Args {
    /// Input file name; reads from stdin otherwise.
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Input file name (same as the positional argument).
    #[arg(short = 'f', long = "file", value_name = "FILE", conflicts_with = "input")]
    file: Option<PathBuf>,

    /// Output file name; writes to stdout otherwise.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log progress at info level.
    #[arg(short, long)]
    verbose: bool,

    /// Make into conforming Delaunay triangulation.
    #[arg(long)]
    cdt: bool,

    /// Make into mesh.
    #[arg(long)]
    mesh: bool,

    /// Shape bound B for meshing: sin² of the minimum angle.
    #[arg(long = "B", default_value_t = DEFAULT_SHAPE_BOUND)]
    shape_bound: f64,

    /// Size bound S for meshing: maximum edge length. Zero means disabled.
    #[arg(long = "S", default_value_t = 0.0)]
    size_bound: f64,

    /// Make into conforming Gabriel graph.
    #[arg(long)]
    gabriel: bool,

    /// String to put in the 'free_for' field of output edges.
    #[arg(long = "free-for", default_value = "")]
    free_for: String,
}

impl Args {
    fn options(&self) -> PipelineOptions {
        PipelineOptions {
            conforming_delaunay: self.cdt,
            mesh: self.mesh,
            gabriel: self.gabriel,
            criteria: MeshCriteria::new(self.shape_bound, self.size_bound),
            free_for: self.free_for.clone(),
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Error
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}",
                record.level().as_str().to_lowercase(),
                record.args()
            )
        })
        .init();
}

fn read_input(path: Option<&PathBuf>) -> Result<String, MeshError> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn report(err: &MeshError) {
    log::error!("{err}");
    if let MeshError::Parse { source_line, .. } = err {
        log::error!("{source_line}");
        if let Some(indicator) = err.caret_indicator() {
            log::error!("{indicator}");
        }
    }
}

fn run(args: &Args) -> Result<(), MeshError> {
    let text = read_input(args.file.as_ref().or(args.input.as_ref()))?;
    let options = args.options();

    // output is opened only once the input has parsed
    let input = parse_wkt(&text)?;

    let mut sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(fs::File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    process_input(&input, &options, &mut sink)?;
    sink.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(err.exit_code())
        }
    }
}
