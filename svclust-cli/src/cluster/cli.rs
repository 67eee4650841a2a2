use clap::Command;

use crate::common::add_run_args;

pub const CLUSTER_CMD: &str = "cluster";

pub fn create_cluster_cli() -> Command {
    add_run_args(
        Command::new(CLUSTER_CMD)
            .about("Cluster signatures only. Writes the per-type cluster BED files and signatures/all.vcf."),
    )
}
