//! calabash-android UI test step

#![cfg_attr(test, allow(clippy::expect_used))]

use std::process::ExitCode;

use calabash_uitest::cli::Cli;
use calabash_uitest::domain::TestResult;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.run().await {
        TestResult::Succeeded => ExitCode::SUCCESS,
        TestResult::Failed => ExitCode::FAILURE,
    }
}
