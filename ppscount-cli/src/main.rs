//! ppscount binary entrypoint
//!
//! Wires the capture subsystem to the event loop: parses arguments, opens
//! the interface, forwards decoded packets and the interrupt signal over
//! channels, and runs the loop until shutdown.

mod args;

use args::{Cli, Commands};
use ppscount_capture::{list_interfaces, CaptureConfig, PacketCapture};
use ppscount_core::{Reporter, Result, Runner, StopReason};
use std::io;
use std::process::ExitCode;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Start {
            interface,
            filter,
            no_promisc,
        } => start(interface, filter, no_promisc).await,
        Commands::Interfaces => interfaces(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ppscount: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Route log output to stderr so stdout carries only reports
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Open the capture, wire it to the event loop, and run until interrupted
async fn start(interface: String, filter: Option<String>, no_promisc: bool) -> Result<()> {
    let config = CaptureConfig {
        promiscuous: !no_promisc,
        ..CaptureConfig::default()
    };

    let mut capture = PacketCapture::with_config(&interface, config)?;
    if let Some(bpf) = &filter {
        capture.set_filter(bpf);
    }

    let (packet_tx, packet_rx) = mpsc::channel(1024);
    capture.start(move |event| {
        // A dropped receiver means the loop is gone; the reader thread is
        // stopped when the capture is dropped.
        let _ = packet_tx.blocking_send(event);
    })?;

    // Buffered so an interrupt arriving mid-handler is observed on the next
    // loop iteration instead of being lost.
    let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(()).await;
        }
    });

    debug!("counting packets on {}", interface);
    let mut runner = Runner::new(Reporter::new(io::stdout()));
    let reason = runner.run(packet_rx, shutdown_rx).await?;
    capture.stop();

    if reason == StopReason::Interrupted {
        println!("\nInterrupt received. Exiting...");
    }
    Ok(())
}

/// Print the interface table for the `interfaces` subcommand
fn interfaces() -> Result<()> {
    for iface in list_interfaces()? {
        let mut flags = Vec::new();
        if iface.is_up {
            flags.push("up");
        }
        if iface.is_loopback {
            flags.push("loopback");
        }

        let ips: Vec<String> = iface.ips.iter().map(|ip| ip.to_string()).collect();
        println!("{:<16} [{}] {}", iface.name, flags.join(","), ips.join(" "));
    }
    Ok(())
}
