mod call;
mod cluster;
mod common;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "svclust";
    pub const BIN_NAME: &str = "svclust";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Cluster structural variant signatures from long-read alignments and call consensus variants.")
        .subcommand_required(true)
        .subcommand(call::cli::create_call_cli())
        .subcommand(cluster::cli::create_cluster_cli())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // CALL
        //
        Some((call::cli::CALL_CMD, matches)) => {
            call::handlers::run_call(matches)?;
        }

        //
        // CLUSTER
        //
        Some((cluster::cli::CLUSTER_CMD, matches)) => {
            cluster::handlers::run_cluster(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
