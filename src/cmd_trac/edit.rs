use clap::*;
use std::io::Write;
use trac::libs::pairs::all_pairs_edit;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("edit")
        .about("Edit-distance alignment of every pair of sequences")
        .after_help(
            r###"
Aligns each pair (i, j), i < j, by minimum edit cost. No substitution matrix
is involved; identical symbols cost nothing.

Notes:
* Works on any alphabet, nucleotides and proteins alike
* The longer sequence of a pair is always written first; the `swapped`
  column is 1 when that is sequence j
* Output columns: i, j, cost, swapped, aligned longer, aligned shorter

Examples:
1. Default costs, insertion/deletion 1 and substitution 2:
   trac edit tests/trac/dna.txt

2. Levenshtein distance:
   trac edit tests/trac/dna.txt --indel 1 --sub 1

"###,
        )
        .arg(super::arg_infile())
        .arg(
            Arg::new("indel")
                .long("indel")
                .value_parser(value_parser!(u32))
                .default_value("1")
                .help("Cost of one insertion or deletion"),
        )
        .arg(
            Arg::new("sub")
                .long("sub")
                .value_parser(value_parser!(u32))
                .default_value("2")
                .help("Cost of one substitution"),
        )
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

    //----------------------------
    // Ops
    //----------------------------
    let seqs = super::load_sequences(infile)?;
    let raw: Vec<&str> = seqs.iter().map(|s| s.seq.as_str()).collect();

    for (i, j, aln) in all_pairs_edit(&raw, config.edit) {
        writer.write_fmt(format_args!(
            "{}\t{}\t{}\t{}\t{}\t{}\n",
            i,
            j,
            aln.cost,
            aln.swapped as u8,
            aln.first,
            aln.second
        ))?;
    }

    Ok(())
}
