use clap::Command;

use crate::common::add_run_args;

pub const CALL_CMD: &str = "call";

pub fn create_call_cli() -> Command {
    add_run_args(
        Command::new(CALL_CMD)
            .about("Cluster signatures, merge clusters across evidence passes and write genotyped calls (calls.bed, calls.vcf)."),
    )
}
