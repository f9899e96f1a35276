use clap::{Args, Parser, Subcommand};

use homeloan_server::{serve, ServeOverrides};

#[derive(Parser, Debug)]
#[command(
    name = "homeloan-server",
    about = "Serve mortgage calculations over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let Command::Serve(args) = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    let overrides = ServeOverrides {
        host: args.host,
        port: args.port,
    };
    if let Err(err) = serve(overrides).await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}
