//! Subcommand modules for the `trac` binary.

pub mod align;
pub mod cluster;
pub mod edit;
pub mod run;
pub mod translate;

use anyhow::Context;
use clap::*;
use trac::libs::align::{AlignMethod, EditCosts, DEFAULT_LINEAR_THRESHOLD};
use trac::libs::config::{parse_frames, Config};
use trac::libs::seq::{parse_sequences, NtSeq};
use trac::libs::table::{CodonTable, SubMatrix};
use trac::libs::translate::WrapIncompleteCodon;

pub fn arg_infile() -> Arg {
    Arg::new("infile")
        .required(true)
        .num_args(1)
        .index(1)
        .help("Input file, plain text or FASTA, .gz allowed. [stdin] for screen")
}

pub fn arg_outfile() -> Arg {
    Arg::new("outfile")
        .long("outfile")
        .short('o')
        .num_args(1)
        .default_value("stdout")
        .help("Output filename. [stdout] for screen")
}

pub fn arg_parallel() -> Arg {
    Arg::new("parallel")
        .long("parallel")
        .short('p')
        .value_parser(value_parser!(usize))
        .num_args(1)
        .default_value("1")
        .help("Number of threads for parallel processing")
}

pub fn with_translate_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("codon")
            .long("codon")
            .num_args(1)
            .default_value("standard")
            .help("Codon table: `standard` or a TSV file of CODON<TAB>AA"),
    )
    .arg(
        Arg::new("frame")
            .long("frame")
            .short('f')
            .num_args(1)
            .default_value("all")
            .help("Reading frames: 0, 1, 2, a list such as 0,2, or all"),
    )
    .arg(
        Arg::new("wrap")
            .long("wrap")
            .action(ArgAction::SetTrue)
            .help("Treat sequences as circular and complete the last codon from the start"),
    )
}

pub fn with_matrix_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("matrix")
            .long("matrix")
            .num_args(1)
            .default_value("blosum62")
            .help("Substitution matrix: `blosum62` or a whitespace-delimited matrix file"),
    )
    .arg(
        Arg::new("gap")
            .long("gap")
            .value_parser(value_parser!(i32))
            .default_value("-2")
            .allow_negative_numbers(true)
            .help("Score added for each gap column"),
    )
}

pub fn with_align_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("method")
            .long("method")
            .value_parser(["full", "linear", "auto"])
            .default_value("auto")
            .help("Alignment algorithm: full DP, Hirschberg, or chosen by size"),
    )
    .arg(
        Arg::new("threshold")
            .long("threshold")
            .value_parser(value_parser!(usize))
            .default_value("1000000")
            .help("With --method auto, DP cell count above which Hirschberg is used"),
    )
}

pub fn with_cluster_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("eps")
            .long("eps")
            .value_parser(value_parser!(i32))
            .default_value("30")
            .allow_negative_numbers(true)
            .help("Minimum similarity for two sequences to be neighbors"),
    )
    .arg(
        Arg::new("min_points")
            .long("min-points")
            .value_parser(value_parser!(usize))
            .default_value("3")
            .help("Minimum neighborhood size of a core point, itself included"),
    )
}

/// Collects whichever run parameters the subcommand defines and validates them.
pub fn build_config(args: &ArgMatches) -> anyhow::Result<Config> {
    let mut config = Config::default();

    if let Some(gap) = get_opt::<i32>(args, "gap") {
        config.gap = gap;
    }
    if let Some(eps) = get_opt::<i32>(args, "eps") {
        config.eps = eps;
    }
    if let Some(min_points) = get_opt::<usize>(args, "min_points") {
        config.min_points = min_points;
    }
    if let (Some(indel), Some(sub)) = (get_opt::<u32>(args, "indel"), get_opt::<u32>(args, "sub")) {
        config.edit = EditCosts {
            indel,
            substitution: sub,
        };
    }
    if let Some(frame) = get_opt::<String>(args, "frame") {
        config.frames = parse_frames(&frame)?;
    }
    if let Ok(Some(&wrap)) = args.try_get_one::<bool>("wrap") {
        config.wrap = WrapIncompleteCodon::from_flag(wrap);
    }
    if let Some(method) = get_opt::<String>(args, "method") {
        let threshold = get_opt::<usize>(args, "threshold").unwrap_or(DEFAULT_LINEAR_THRESHOLD);
        config.method = AlignMethod::from_name(&method, threshold)?;
    }
    if let Some(parallel) = get_opt::<usize>(args, "parallel") {
        config.parallel = parallel;
    }

    config.validate()?;
    log::debug!("{:?}", config);
    Ok(config)
}

fn get_opt<T: Clone + Send + Sync + 'static>(args: &ArgMatches, id: &str) -> Option<T> {
    args.try_get_one::<T>(id).ok().flatten().cloned()
}

pub fn load_sequences(infile: &str) -> anyhow::Result<Vec<NtSeq>> {
    let text = trac::read_to_string(infile).with_context(|| format!("reading {}", infile))?;
    let seqs = parse_sequences(&text).with_context(|| format!("parsing {}", infile))?;
    log::info!("Read {} sequences from {}", seqs.len(), infile);
    Ok(seqs)
}

pub fn load_codon_table(args: &ArgMatches) -> anyhow::Result<CodonTable> {
    let name = args.get_one::<String>("codon").unwrap();
    let table =
        CodonTable::from_name(name).with_context(|| format!("loading codon table {}", name))?;
    if !table.is_complete() {
        log::warn!(
            "Codon table {} lacks {} codons: {}",
            name,
            table.missing().len(),
            table.missing().join(",")
        );
    }
    Ok(table)
}

pub fn load_matrix(args: &ArgMatches) -> anyhow::Result<SubMatrix> {
    let name = args.get_one::<String>("matrix").unwrap();
    SubMatrix::from_name(name).with_context(|| format!("loading substitution matrix {}", name))
}
