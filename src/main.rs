use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use rusbit_bencode::config::DEFAULT_CONFIG_FILE;
use rusbit_bencode::{decode_exact, decode_with, dump, encode_to, Config, Torrent};

#[derive(Parser)]
#[command(name = "rusbit-bencode", version, about = "Decode, inspect and canonicalize bencode")]
struct Cli {
    /// Decoder limits file (TOML)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Dump a bencoded string given on the command line
    Decode { bencoded: String },
    /// Print the metadata and info hash of a .torrent file
    Info { torrent: PathBuf },
    /// Re-encode a bencoded file in canonical form
    Canonical {
        #[arg(short, long)]
        output: PathBuf,
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    match cli.command {
        Command::Decode { bencoded } => {
            let value = decode_exact(bencoded.as_bytes(), &config)?;
            print!("{}", dump(&value));
        }
        Command::Info { torrent } => {
            let torrent = Torrent::from_file(&torrent, &config)
                .with_context(|| format!("reading {}", torrent.display()))?;

            println!("Info Hash: {}", hex::encode(torrent.info_hash));
            if let Some(announce) = &torrent.announce {
                println!("Tracker URL: {}", announce);
            }
            for tier in &torrent.announce_list {
                println!("Tracker Tier: {}", tier.join(" "));
            }
            println!("Name: {}", torrent.info.name);
            println!("Length: {}", torrent.info.total_length());
            println!("Piece Length: {}", torrent.info.piece_length);
            println!("Number of Pieces: {}", torrent.info.pieces.len());

            for piece_hash in &torrent.info.pieces {
                println!("{}", hex::encode(piece_hash));
            }
        }
        Command::Canonical { output, input } => {
            let file = File::open(&input).with_context(|| format!("opening {}", input.display()))?;
            let value = decode_with(&mut BufReader::new(file), &config)
                .with_context(|| format!("decoding {}", input.display()))?;

            let out = File::create(&output).with_context(|| format!("creating {}", output.display()))?;
            let mut writer = BufWriter::new(out);
            encode_to(&value, &mut writer)?;
            writer.flush()?;
            info!("wrote canonical encoding to {}", output.display());
        }
    }

    Ok(())
}
