//! Orrery server entry point.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use orrery::{generate_self_signed, run_server, CertOptions, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Orrery: HTTPS asset server for 3D model files
#[derive(Parser, Debug)]
#[command(name = "orrery")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the model file server (default behavior)
    Serve {
        /// Port to listen on. If not specified, uses the config file value.
        #[arg(short, long)]
        port: Option<u16>,
        /// Serve HTTPS using the configured certificate pair
        #[arg(long)]
        https: bool,
        /// Enable JSON logging format
        #[arg(long)]
        json_logs: bool,
    },
    /// Generate a self-signed certificate pair for local HTTPS
    GenCert {
        /// LAN IP address to include in the certificate
        #[arg(long, default_value = "192.168.1.2")]
        ip: Ipv4Addr,
        /// Directory to write cert.pem and key.pem into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Some(Command::GenCert { ip, out_dir }) => run_gen_cert(ip, &out_dir),
        Some(Command::Serve {
            port,
            https,
            json_logs,
        }) => run_serve(&args.config, port, https, json_logs).await,
        None => run_serve(&args.config, None, false, false).await,
    }
}

/// Generate and write the development certificate pair.
fn run_gen_cert(ip: Ipv4Addr, out_dir: &std::path::Path) -> anyhow::Result<()> {
    // Minimal logging for the one-shot command
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let certs = generate_self_signed(&CertOptions { ip })?;
    let (cert_path, key_path) = certs.write_to(out_dir)?;

    println!("SSL certificates created successfully!");
    println!(
        "Files created: {}, {}",
        cert_path.display(),
        key_path.display()
    );
    println!("Certificate includes IP addresses: 127.0.0.1, {ip}");
    Ok(())
}

/// Run the model file server.
async fn run_serve(
    config_path: &Option<String>,
    port: Option<u16>,
    https: bool,
    json_logs: bool,
) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting orrery v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = if let Some(path) = config_path {
        Config::from_file(path)?
    } else {
        Config::load()?
    };

    // CLI flags override file values only when explicitly provided
    if let Some(p) = port {
        config.server.port = p;
    }
    if https {
        config.tls.enabled = true;
    }

    // Install rustls crypto provider for HTTPS support
    if config.tls.enabled {
        rustls::crypto::aws_lc_rs::default_provider()
            .install_default()
            .expect("Failed to install rustls crypto provider");
    }

    tracing::info!(
        port = config.server.port,
        tls = config.tls.enabled,
        models_dir = %config.models_dir().display(),
        "Configuration loaded"
    );

    run_server(config).await
}
