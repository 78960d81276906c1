mod args;
mod client;
mod device;
mod interactive;

use crate::args::CmdArgs;
use crate::client::Client;
use clap::Parser;
use console::style;
use eyre::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    color_eyre::install().expect("Failed to install `color_eyre`");
    let args = CmdArgs::parse();

    let default_level = if args.quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt::Subscriber::builder()
        .without_time()
        .with_env_filter(filter)
        .finish()
        .init();

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!("{e:?}");
            std::process::exit(1);
        }
    }
}

/// Returns `false` if a one-shot command got no response.
fn run(args: CmdArgs) -> Result<bool> {
    let device = match &args.device {
        Some(device) => device.clone(),
        None => {
            tracing::warn!("no device specified, searching for an RPMsg endpoint");
            device::find_rpmsg_device()?
        }
    };
    let mut client = Client::open(&device)?;

    if args.is_interactive() {
        interactive::run(&mut client, args.timeout)?;
        return Ok(true);
    }

    let responded = client
        .send_and_receive(&args.message(), args.timeout)?
        .is_some();
    if !responded {
        println!(
            "{}",
            style(format!(
                "⚠ No response from M4F on {} (timeout)",
                client.path().display()
            ))
            .yellow()
        );
    }
    Ok(responded)
}
