use clap::Parser;
use diffscribe_core::error::CredentialError;
use diffscribe_core::{
    CoreCliArgs, CoreCommand, DiffscribeError, Output, dotenv, execute_auth_flow,
    execute_diffscribe_flow,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli_args = CoreCliArgs::parse();

    // load .env before anything reads the environment
    dotenv().ok();
    init_logging(cli_args.verbose);

    let result = match cli_args.command {
        Some(CoreCommand::Auth) => execute_auth_flow(),
        None => execute_diffscribe_flow(&cli_args).await.map(|_| ()),
    };

    if let Err(e) = result {
        report_failure(&e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,diffscribe_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn report_failure(e: &DiffscribeError) {
    let output = Output;
    output.error(e);
    output.dim(e.hint());
    if matches!(
        e,
        DiffscribeError::Credential(CredentialError::Missing | CredentialError::CorruptConfig { .. })
    ) {
        output.dim("To use mock mode for testing, run: diffscribe --mock");
    }
}
