use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "cinerate-server")]
#[command(about = "JSON:API movie ratings service", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "cinerate-server.yaml")]
    config: String,

    /// Load demo fixtures into the database and exit.
    #[arg(long)]
    stage: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinerate=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let result = if args.stage {
        cinerate::stage(&args.config).await
    } else {
        cinerate::run(&args.config).await
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
