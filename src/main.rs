use clap::Parser;
use dotenv::dotenv;
use tracing::{error, Level};

use ghkw::error::{EXIT_CODE_OK, EXIT_CODE_PARSE_FLAGS_ERROR};
use ghkw::{cli, Args};

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version land here too and are not failures
            let code = if e.use_stderr() {
                EXIT_CODE_PARSE_FLAGS_ERROR
            } else {
                EXIT_CODE_OK
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Diagnostics go to stderr so stdout only carries the table
    let level = if args.debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    dotenv().ok();

    let mut stdout = std::io::stdout();
    let code = match cli::run(&args, &mut stdout).await {
        Ok(()) => EXIT_CODE_OK,
        Err(e) => {
            error!("{}", e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}
