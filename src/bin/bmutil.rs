use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::Cursor;

use bmutil::address::Address;
use bmutil::identity::PrivateId;
use bmutil::pow::{DEFAULT_EXTRA_BYTES, DEFAULT_NONCE_TRIALS_PER_BYTE};
use bmutil::wire::{Message, MsgAddr};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bmutil", about = "Inspect Bitmessage payloads and identities")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a hex-encoded `addr` payload.
    DecodeAddr { hex: String },

    /// Show the version, stream and ripe of an address.
    Address { address: String },

    /// Import an identity from WIF keys and print its public half.
    Identity {
        address: String,
        signing_wif: String,
        encryption_wif: String,

        #[arg(long, default_value_t = DEFAULT_NONCE_TRIALS_PER_BYTE)]
        nonce_trials_per_byte: u64,

        #[arg(long, default_value_t = DEFAULT_EXTRA_BYTES)]
        extra_bytes: u64,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::DecodeAddr { hex } => decode_addr(&hex)?,
        Commands::Address { address } => show_address(&address)?,
        Commands::Identity {
            address,
            signing_wif,
            encryption_wif,
            nonce_trials_per_byte,
            extra_bytes,
        } => show_identity(
            &address,
            &signing_wif,
            &encryption_wif,
            nonce_trials_per_byte,
            extra_bytes,
        )?,
    }

    Ok(())
}

fn decode_addr(payload_hex: &str) -> Result<(), Box<dyn Error>> {
    let payload = hex::decode(payload_hex.trim())?;
    debug!(len = payload.len(), "decoding addr payload");

    let mut cursor = Cursor::new(&payload);
    let msg = MsgAddr::decode(&mut cursor)?;

    let trailing = payload.len() - cursor.position() as usize;
    if trailing > 0 {
        info!(trailing, "payload has bytes past the last record");
    }

    println!("{} addresses", msg.addr_list.len());
    for na in &msg.addr_list {
        println!(
            "  {} stream={} services={:?} timestamp={}",
            na.socket_addr(),
            na.stream,
            na.services,
            na.timestamp
        );
    }

    Ok(())
}

fn show_address(address: &str) -> Result<(), Box<dyn Error>> {
    let addr = Address::decode(address)?;

    println!("version: {}", addr.version);
    println!("stream:  {}", addr.stream);
    println!("ripe:    {}", hex::encode(addr.ripe));

    Ok(())
}

fn show_identity(
    address: &str,
    signing_wif: &str,
    encryption_wif: &str,
    nonce_trials_per_byte: u64,
    extra_bytes: u64,
) -> Result<(), Box<dyn Error>> {
    let id = PrivateId::import_wif(
        address,
        signing_wif,
        encryption_wif,
        nonce_trials_per_byte,
        extra_bytes,
    )?
    .to_public();

    println!("address:               {}", id.address_string()?);
    println!("version:               {}", id.address_version());
    println!("stream:                {}", id.stream());
    println!("signing key:           {}", hex::encode(id.signing_key_bytes()));
    println!("encryption key:        {}", hex::encode(id.encryption_key_bytes()));
    println!("nonce trials per byte: {}", id.nonce_trials_per_byte());
    println!("extra bytes:           {}", id.extra_bytes());

    Ok(())
}
