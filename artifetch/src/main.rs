use anyhow::Result;
use artifetch::{Args, LOG_ENV};
use clap::{CommandFactory, Parser};

fn main() -> Result<()> {
    use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};
    tracing_log::LogTracer::init().ok();
    let env = std::env::var(LOG_ENV).unwrap_or_else(|_| "error".into());
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_span_events(FmtSpan::ACTIVE | FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::new(env))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
    log_panics::init();

    let opts = match Args::parse().into_options() {
        Ok(opts) => opts,
        Err(err) => {
            // missing mandatory flags print the usage and exit successfully
            log::warn!("{}", err);
            Args::command().print_help()?;
            return Ok(());
        }
    };
    let dest = artifetch::run(&opts)?;
    println!("artifact successfully downloaded to {}", dest.display());
    Ok(())
}
