use clap::*;
use itertools::Itertools;
use std::io::Write;
use trac::libs::cluster::ClusterReport;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("cluster")
        .about("DBSCAN clustering of protein sequences by similarity")
        .after_help(
            r###"
Clusters the input proteins with DBSCAN over a position-wise similarity.

Notes:
* Similarity pads the shorter sequence with gaps, scores each gap position
  with --gap and each other position with the substitution matrix, and sums
* --eps is a MINIMUM SIMILARITY: two sequences are neighbors when their
  similarity is at least eps, so a larger eps means tighter clusters
* A sequence is a core point when at least --min-points sequences, itself
  included, are its neighbors
* A pair with a symbol missing from the matrix is never a neighbor
* Clusters are numbered from 1 in the order they are found; noise is -1
* Output formats:
    * label: name and label per input sequence, in input order
    * cluster: one line of tab-separated names per cluster, noise last

Examples:
1. Default parameters, eps 30 and min-points 3:
   trac cluster tests/trac/protein.txt

2. Looser neighborhoods, one line per cluster:
   trac cluster tests/trac/protein.txt --eps 10 --min-points 2 --format cluster

"###,
        )
        .arg(super::arg_infile());

    let cmd = super::with_matrix_args(cmd);
    super::with_cluster_args(cmd)
        .arg(arg_format())
        .arg(super::arg_parallel())
        .arg(super::arg_outfile())
}

pub fn arg_format() -> Arg {
    Arg::new("format")
        .long("format")
        .value_parser(["label", "cluster"])
        .default_value("label")
        .help("Output format")
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let opt_format = args.get_one::<String>("format").unwrap();
    let mut writer = trac::writer(args.get_one::<String>("outfile").unwrap())?;

    let config = super::build_config(args)?;
    let matrix = super::load_matrix(args)?;

    //----------------------------
    // Ops
    //----------------------------
    let seqs = super::load_sequences(infile)?;
    let names: Vec<String> = seqs.iter().map(|s| s.name.clone()).collect();
    let proteins: Vec<&str> = seqs.iter().map(|s| s.seq.as_str()).collect();

    let report = config
        .dbscan()
        .run(&proteins, &matrix, config.gap, config.parallel)?;
    log::info!(
        "{} clusters, {} failed pairs",
        report.n_clusters(),
        report.failures.len()
    );

    write_report(&mut writer, &names, &report, opt_format)?;

    Ok(())
}

pub fn write_report(
    writer: &mut Box<dyn Write>,
    names: &[String],
    report: &ClusterReport,
    format: &str,
) -> anyhow::Result<()> {
    match format {
        "cluster" => {
            for members in report.clusters() {
                writer.write_fmt(format_args!(
                    "{}\n",
                    members.iter().map(|&idx| &names[idx]).join("\t")
                ))?;
            }
        }
        _ => {
            for (name, label) in names.iter().zip(&report.labels) {
                writer.write_fmt(format_args!("{}\t{}\n", name, label))?;
            }
        }
    }
    Ok(())
}
