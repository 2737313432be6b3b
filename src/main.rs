use clap::Parser;
use tokenmaker::cli::{Args, Command, init_logging, load_maker, ttl_duration};
use tracing::error;

fn main() {
    let args = Args::parse();

    init_logging(&args.log_format);

    let Some(maker) = load_maker(&args.config) else {
        std::process::exit(1);
    };

    let output = match args.command {
        Command::Issue { username, ttl } => {
            let Some(duration) = ttl_duration(ttl) else {
                std::process::exit(1);
            };
            maker
                .create_token(&username, duration)
                .map(|issued| serde_json::to_string_pretty(&issued))
        }
        Command::Verify { token } => maker
            .verify_token(&token)
            .map(|payload| serde_json::to_string_pretty(&payload)),
    };

    match output {
        Ok(Ok(json)) => println!("{json}"),
        Ok(Err(e)) => {
            error!(error = %e, "Failed to serialize output");
            std::process::exit(1);
        }
        Err(e) => {
            error!(scheme = %maker.scheme(), error = %e, "Token operation failed");
            std::process::exit(1);
        }
    }
}
