use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use fastqident::logging::init_logger;
use fastqident::{IdentError, IdentifierConfig, MinOffset, ReaderOptions, detect_encodings};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fastqident", version)]
#[command(about = "Detect the quality encoding of FASTQ sequence files", long_about = None)]
struct Cli {
    /// The FASTQ files to identify (plain or .gz)
    fastq: Vec<PathBuf>,

    /// Upper bound on the quality values expected in the files. A tighter
    /// bound makes identification more reliable; too low a bound misidentifies.
    #[arg(short, long, default_value_t = 40, value_parser = clap::value_parser!(u32).range(1..))]
    max_quality: u32,

    /// Number of nucleotides to sample from each file (0 = no limit)
    #[arg(short, long, default_value_t = 50_000)]
    nnuc: u64,

    /// Records to skip at the beginning of each file; the first records of
    /// a run are often uninformative
    #[arg(short, long, default_value_t = 0)]
    initskip: u64,

    /// Records to skip between two sampled records
    #[arg(short, long, default_value_t = 4)]
    skip: u64,

    /// Comma-separated list of possible encodings
    #[arg(short = 'e', long, default_value = "sanger,solexa,illumina")]
    possible_encodings: String,

    /// Minimum ASCII value of sanger qualities (number or character)
    #[arg(short = 'g', long, default_value = "33")]
    sanger_min: String,

    /// Minimum ASCII value of solexa qualities (number or character)
    #[arg(short = 'x', long, default_value = "59")]
    solexa_min: String,

    /// Minimum ASCII value of illumina qualities (number or character)
    #[arg(short = 'l', long, default_value = "64")]
    illumina_min: String,

    /// Do not fail when no files are given; useful inside pipelines
    #[arg(short = 'z', long)]
    allow_empty_file_list: bool,

    /// Print format names such as `fastq-illumina`
    #[arg(long)]
    format_names: bool,

    /// Skip malformed records instead of giving up on the file
    #[arg(long)]
    lenient: bool,

    /// Require sequence and quality on a single line each
    #[arg(long)]
    single_line: bool,

    /// Worker threads (0 = one per core)
    #[arg(short, long, default_value_t = 0)]
    threads: usize,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> Result<IdentifierConfig, IdentError> {
        let mut reader = ReaderOptions::default();
        if self.lenient {
            reader = reader.lenient();
        }
        if self.single_line {
            reader = reader.single_line();
        }
        Ok(IdentifierConfig {
            max_quality: self.max_quality,
            encodings: self.possible_encodings.clone(),
            sanger_min: self.sanger_min.parse::<MinOffset>()?,
            solexa_min: self.solexa_min.parse::<MinOffset>()?,
            illumina_min: self.illumina_min.parse::<MinOffset>()?,
            start: self.initskip,
            stride: self.skip,
            nucleotide_budget: self.nnuc,
            reader,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if cli.fastq.is_empty() && !cli.allow_empty_file_list {
        Cli::command()
            .error(
                ErrorKind::TooFewValues,
                "need at least one fastq file to operate on (pass -z to allow none)",
            )
            .exit();
    }

    let identifier = cli
        .config()
        .and_then(|c| c.build())
        .context("no files were processed")?;

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("failed to configure worker threads")?;
    }

    let report = detect_encodings(&identifier, &cli.fastq);

    let mut out = BufWriter::new(io::stdout().lock());
    for (path, verdict) in report.iter() {
        let label = match verdict {
            Ok(d) if cli.format_names => d.encoding.format_name(),
            Ok(d) => d.encoding.name(),
            Err(e) => e.marker(),
        };
        writeln!(out, "{}\t{}", path.display(), label)?;
    }
    out.flush()?;

    if report.failures() > 0 {
        log::info!("{} of {} files could not be identified", report.failures(), report.len());
    }
    Ok(())
}
