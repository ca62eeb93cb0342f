use args::Args;
use clap::Parser;

mod args;
mod logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Before the configuration is read, so its loading is logged.
    logger::init(&args);

    let serve_config = args.serve_config()?;

    if let Err(e) = server::serve(serve_config).await {
        log::error!("Chat relay stopped: {e}");
        std::process::exit(1);
    }

    Ok(())
}
