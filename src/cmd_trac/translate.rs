use clap::*;
use std::io::Write;
use trac::libs::translate::Translator;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("translate")
        .about("Translates nucleotide sequences into proteins")
        .after_help(
            r###"
Translates every input sequence in the selected reading frames.

Notes:
* Input is FASTA or whitespace-delimited sequences, plain or gzipped
* Reads from stdin if input file is 'stdin'
* Unnamed sequences are called seq1, seq2, ...
* Frames 1 and 2 skip the first one or two bases
* Trailing bases that do not fill a codon are dropped, unless --wrap is set;
  then the sequence is read as circular
* Stop codons translate to `*`
* A sequence with a codon missing from the table is skipped with a warning
* Output columns: name, frame, protein

Examples:
1. Translate all three frames:
   trac translate tests/trac/dna.txt

2. Frame 0 only, circular reading:
   trac translate tests/trac/dna.txt --frame 0 --wrap

3. Use a custom codon table:
   trac translate tests/trac/dna.fa --codon my_codons.tsv

"###,
        )
        .arg(super::arg_infile());

    super::with_translate_args(cmd).arg(super::arg_outfile())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let mut writer = trac::writer(args.get_one::<String>("outfile").unwrap())?;

    let config = super::build_config(args)?;
    let table = super::load_codon_table(args)?;

    //----------------------------
    // Ops
    //----------------------------
    let seqs = super::load_sequences(infile)?;
    let translator = Translator::new(&table, config.wrap);
    let (proteins, failures) = translator.translate_records(&seqs, &config.frames);

    if proteins.is_empty() && !failures.is_empty() {
        anyhow::bail!("No sequence could be translated");
    }

    for protein in &proteins {
        writer.write_fmt(format_args!(
            "{}\t{}\t{}\n",
            protein.name, protein.frame, protein.seq
        ))?;
    }

    Ok(())
}
