use clap::*;
use std::io::Write;
use trac::libs::align::Aligner;
use trac::libs::pairs::all_pairs;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("align")
        .about("Globally aligns every pair of protein sequences")
        .after_help(
            r###"
Aligns each pair (i, j), i < j, of the input proteins with a substitution
matrix and a linear gap penalty.

Notes:
* Input is FASTA or whitespace-delimited sequences, plain or gzipped
* Pairs are numbered from 0 and written in order: (0,1), (0,2), ..., (1,2), ...
* --method full keeps the whole DP matrix; --method linear uses Hirschberg's
  algorithm and linear memory; --method auto picks linear above --threshold cells
* Both methods reach the same optimal score
* A pair containing a symbol missing from the matrix is skipped with a warning
* Output order does not depend on --parallel
* Output columns: i, j, score, aligned i, aligned j

Examples:
1. Align with BLOSUM62 and gap -2:
   trac align tests/trac/protein.txt

2. Force Hirschberg with a stiffer gap penalty on 4 threads:
   trac align tests/trac/protein.txt --method linear --gap -8 -p 4

"###,
        )
        .arg(super::arg_infile());

    let cmd = super::with_matrix_args(cmd);
    super::with_align_args(cmd)
        .arg(super::arg_parallel())
        .arg(super::arg_outfile())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let mut writer = trac::writer(args.get_one::<String>("outfile").unwrap())?;

    let config = super::build_config(args)?;
    let matrix = super::load_matrix(args)?;

    //----------------------------
    // Ops
    //----------------------------
    let seqs = super::load_sequences(infile)?;
    let proteins: Vec<&str> = seqs.iter().map(|s| s.seq.as_str()).collect();

    let aligner = Aligner::new(&matrix, config.align_params(), config.method);
    let report = all_pairs(&proteins, &aligner, config.parallel)?;

    if report.alignments.is_empty() && !report.failures.is_empty() {
        anyhow::bail!("No pair could be aligned");
    }

    for pair in &report.alignments {
        writer.write_fmt(format_args!(
            "{}\t{}\t{}\t{}\t{}\n",
            pair.i, pair.j, pair.alignment.score, pair.alignment.first, pair.alignment.second
        ))?;
    }

    Ok(())
}
