mod args;
use crate::args::{Args, Commands, StatusArgs, VerifyArgs};

use clap::Parser;
use itertools::Itertools;
use log::info;
use thiserror::Error;
use verifier::{
    api::{poll_verification_status, ApiClient, ApiClientError, VerificationJob, VerificationRequest},
    class_hash::ClassHash,
    progress::ProgressIndicator,
    resolver, search_path,
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiClientError),

    #[error(transparent)]
    SearchPath(#[from] search_path::Error),

    #[error(transparent)]
    Resolver(#[from] resolver::Error),

    #[error("Class hash {0} is not declared on this network")]
    NotDeclared(ClassHash),
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let Args { command } = Args::parse();
    match &command {
        Commands::Verify(args) => {
            let client = ApiClient::new(
                args.network_url.api.clone(),
                args.network_url.explorer.clone(),
            )?;

            let job_id = submit(&client, args)?;
            println!("verification job id: {job_id}");

            watch(&client, &job_id)?;
            let link = client.class_url(&args.class_hash)?;
            println!("Success! {link}");
        }
        Commands::Status(args) => {
            let client = ApiClient::new(
                args.network_url.api.clone(),
                args.network_url.explorer.clone(),
            )?;

            let job = check(&client, args)?;
            println!("job {} finished: {}", job.job_id(), job.status());
        }
    }
    Ok(())
}

fn submit(client: &ApiClient, args: &VerifyArgs) -> Result<String, CliError> {
    if !client.is_hash_verifiable(&args.class_hash)? {
        return Err(CliError::NotDeclared(args.class_hash.clone()));
    }

    let search_paths = search_path::import_search_paths(
        args.cairo_path.as_deref(),
        args.toolchain_path.as_deref(),
    )?;

    let name = resolver::contract_name(&args.main_file);
    info!("Verifying {name} against class hash {}", args.class_hash);

    let files = resolver::collect_files(&args.main_file, &search_paths)?;

    println!("These are the files that I'm about to transfer:");
    for key in files.keys().sorted() {
        println!("{key}");
    }

    let main_file_path = args
        .main_file
        .file_name()
        .unwrap_or(args.main_file.as_str())
        .to_string();

    let request = VerificationRequest {
        main_file_path,
        class_hash: args.class_hash.to_string(),
        name,
        compiler_version: args.compiler_version.clone(),
        is_account_contract: resolver::is_account_contract(&args.main_file),
        files: files.into_files(),
    };

    client.create_job(&request).map_err(CliError::from)
}

fn watch(client: &ApiClient, job_id: &str) -> Result<VerificationJob, CliError> {
    let spinner = ProgressIndicator::new_spinner("Waiting for verification result");
    let result = poll_verification_status(client, job_id);
    spinner.finish_and_clear();
    result.map_err(CliError::from)
}

fn check(client: &ApiClient, args: &StatusArgs) -> Result<VerificationJob, CliError> {
    poll_verification_status(client, &args.job).map_err(CliError::from)
}
