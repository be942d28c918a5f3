use clap::*;
use std::io::Write;
use trac::libs::align::Aligner;
use trac::libs::pairs::all_pairs;
use trac::libs::translate::Translator;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("run")
        .about("Translates, aligns all pairs, then clusters")
        .after_help(
            r###"
Runs the whole pipeline on nucleotide input:

    translate -> align every protein pair -> DBSCAN

Notes:
* Takes every option of `translate`, `align` and `cluster`
* Each protein is named after its source, with _f1 / _f2 for shifted frames
* Output has three sections, each headed by a `#` line:
    * # proteins: name, frame, protein
    * # alignments: i, j, score, aligned i, aligned j
    * # labels: name and cluster label
* --cluster-on proteins (default) clusters the translated proteins
* --cluster-on alignments clusters the aligned rows instead, two per pair in
  pair order; rows are named i-j:protein

Examples:
1. Default pipeline:
   trac run tests/trac/dna.txt

2. Frame 0 only, cluster the aligned rows:
   trac run tests/trac/dna.txt --frame 0 --cluster-on alignments

"###,
        )
        .arg(super::arg_infile());

    let cmd = super::with_translate_args(cmd);
    let cmd = super::with_matrix_args(cmd);
    let cmd = super::with_align_args(cmd);
    super::with_cluster_args(cmd)
        .arg(
            Arg::new("cluster_on")
                .long("cluster-on")
                .value_parser(["proteins", "alignments"])
                .default_value("proteins")
                .help("What DBSCAN clusters"),
        )
        .arg(super::cluster::arg_format())
        .arg(super::arg_parallel())
        .arg(super::arg_outfile())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let opt_cluster_on = args.get_one::<String>("cluster_on").unwrap();
    let opt_format = args.get_one::<String>("format").unwrap();
    let mut writer = trac::writer(args.get_one::<String>("outfile").unwrap())?;

    let config = super::build_config(args)?;
    let table = super::load_codon_table(args)?;
    let matrix = super::load_matrix(args)?;

    //----------------------------
    // Translate
    //----------------------------
    let seqs = super::load_sequences(infile)?;
    let translator = Translator::new(&table, config.wrap);
    let (proteins, failures) = translator.translate_records(&seqs, &config.frames);
    if proteins.is_empty() && !failures.is_empty() {
        anyhow::bail!("No sequence could be translated");
    }

    writer.write_fmt(format_args!("# proteins\n"))?;
    for protein in &proteins {
        writer.write_fmt(format_args!(
            "{}\t{}\t{}\n",
            protein.label(),
            protein.frame,
            protein.seq
        ))?;
    }

    //----------------------------
    // Align
    //----------------------------
    let protein_seqs: Vec<&str> = proteins.iter().map(|p| p.seq.as_str()).collect();
    let aligner = Aligner::new(&matrix, config.align_params(), config.method);
    let report = all_pairs(&protein_seqs, &aligner, config.parallel)?;
    if report.alignments.is_empty() && !report.failures.is_empty() {
        anyhow::bail!("No pair could be aligned");
    }

    writer.write_fmt(format_args!("# alignments\n"))?;
    for pair in &report.alignments {
        writer.write_fmt(format_args!(
            "{}\t{}\t{}\t{}\t{}\n",
            pair.i, pair.j, pair.alignment.score, pair.alignment.first, pair.alignment.second
        ))?;
    }

    //----------------------------
    // Cluster
    //----------------------------
    let dbscan = config.dbscan();
    let (names, clustered) = match opt_cluster_on.as_str() {
        "alignments" => {
            let names: Vec<String> = report
                .alignments
                .iter()
                .flat_map(|p| {
                    [
                        format!("{}-{}:{}", p.i, p.j, proteins[p.i].label()),
                        format!("{}-{}:{}", p.i, p.j, proteins[p.j].label()),
                    ]
                })
                .collect();
            let rows = report.rows();
            (
                names,
                dbscan.run(&rows, &matrix, config.gap, config.parallel)?,
            )
        }
        _ => (
            proteins.iter().map(|p| p.label()).collect(),
            dbscan.run(&protein_seqs, &matrix, config.gap, config.parallel)?,
        ),
    };
    log::info!(
        "{} clusters over {} {}",
        clustered.n_clusters(),
        names.len(),
        opt_cluster_on
    );

    writer.write_fmt(format_args!("# labels\n"))?;
    super::cluster::write_report(&mut writer, &names, &clustered, opt_format)?;

    Ok(())
}
