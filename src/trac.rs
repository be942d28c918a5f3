extern crate clap;
use clap::*;

mod cmd_trac;

fn main() -> anyhow::Result<()> {
    let app = Command::new("trac")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`trac` - Translate, Align and Cluster sequences")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true)
                .help("Log more: -v for info, -vv for debug"),
        )
        .subcommand(cmd_trac::translate::make_subcommand())
        .subcommand(cmd_trac::align::make_subcommand())
        .subcommand(cmd_trac::edit::make_subcommand())
        .subcommand(cmd_trac::cluster::make_subcommand())
        .subcommand(cmd_trac::run::make_subcommand())
        .after_help(
            r###"Subcommands:

* Single stages:
    * translate - Nucleotides to proteins in up to three frames
    * align     - Needleman-Wunsch / Hirschberg alignment of all protein pairs
    * edit      - Edit-distance alignment of all pairs
    * cluster   - DBSCAN over substitution-matrix similarity

* Pipeline:
    * run - translate, align and cluster in one pass

Logging goes to stderr and follows RUST_LOG; the default level is `warn`.

"###,
        );

    let matches = app.get_matches();
    // global args are propagated down into the subcommand's matches
    let verbose = matches
        .subcommand()
        .map_or(0, |(_, sub_matches)| sub_matches.get_count("verbose"));
    setup_logging(verbose);

    // Check which subcomamnd the user ran...
    match matches.subcommand() {
        Some(("translate", sub_matches)) => cmd_trac::translate::execute(sub_matches),
        Some(("align", sub_matches)) => cmd_trac::align::execute(sub_matches),
        Some(("edit", sub_matches)) => cmd_trac::edit::execute(sub_matches),
        Some(("cluster", sub_matches)) => cmd_trac::cluster::execute(sub_matches),
        Some(("run", sub_matches)) => cmd_trac::run::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}
