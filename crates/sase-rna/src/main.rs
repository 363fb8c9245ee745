//! SASE RNA - Diagnostic Driver
//!
//! Loads the RNA inspector the way the packet engine does, dumps its
//! configuration and replays synthetic traffic across worker threads.
//!
//! # Usage
//!
//! ```bash
//! sase-rna --conf /etc/sase/rna.conf
//! sase-rna --conf rna.conf --threads 8 --packets 100000 --rebuilt 500 --json
//! ```

use anyhow::Context;
use bytes::Bytes;
use clap::Parser;
use sase_inspect::{InspectorHandle, Packet, TracingSink, PKT_REBUILT_STREAM};
use sase_rna::RNA_API;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "sase-rna")]
#[command(version)]
#[command(about = "RNA inspector diagnostic driver", long_about = None)]
struct Cli {
    /// RNA configuration file
    #[arg(long, env = "RNA_CONF_PATH", default_value = "")]
    conf: String,

    /// Utility library path
    #[arg(long, default_value = "")]
    lib: String,

    /// Fingerprint pattern directory
    #[arg(long, default_value = "")]
    fingerprints: String,

    /// Custom fingerprint pattern directory
    #[arg(long, default_value = "")]
    custom_fingerprints: String,

    /// Worker threads
    #[arg(long, short, default_value_t = 1)]
    threads: usize,

    /// Normal packets per worker
    #[arg(long, short, default_value_t = 1000)]
    packets: usize,

    /// Rebuilt-stream packets per worker
    #[arg(long, default_value_t = 0)]
    rebuilt: usize,

    /// Print statistics as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn options(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("rna_conf_path", self.conf.as_str()),
            ("rna_util_lib_path", self.lib.as_str()),
            ("fingerprint_dir", self.fingerprints.as_str()),
            ("custom_fingerprint_dir", self.custom_fingerprints.as_str()),
        ]
    }
}

fn synthetic_packets(normal: usize, rebuilt: usize) -> Vec<Packet> {
    let payload = Bytes::from_static(b"\x45\x00\x00\x28synthetic");
    let mut pkts = vec![Packet::new(payload.clone()); normal];
    let rebuilt_pkt = Packet::new(payload).with_flags(PKT_REBUILT_STREAM);
    pkts.extend(std::iter::repeat(rebuilt_pkt).take(rebuilt));
    pkts
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    tracing::info!("SASE RNA v{}", env!("CARGO_PKG_VERSION"));

    let handle = InspectorHandle::create(&RNA_API, &cli.options())
        .context("failed to create RNA inspector")?;
    handle.show(&mut TracingSink);

    let stats = handle
        .run_workers(cli.threads, |_| synthetic_packets(cli.packets, cli.rebuilt))
        .context("worker run failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", stats);
    }

    handle.destroy();
    Ok(())
}
