use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use rc16::{ByteCompressor, FrequencyTable, RangeCompressor};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rc16", version, about = "Static order-0 range coder")]
struct Cli {
    #[arg(short, long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    Encode {
        #[arg(short, long, default_value = "text.txt")]
        input: PathBuf,
        #[arg(short, long, default_value = "encoded.txt")]
        output: PathBuf,
        /// Decode the result in memory and compare before writing
        #[arg(long)]
        verify: bool,
    },
    /// Decompress a file
    Decode {
        #[arg(short, long, default_value = "encoded.txt")]
        input: PathBuf,
        #[arg(short, long, default_value = "decoded.txt")]
        output: PathBuf,
    },
    /// Print the histogram summary and size estimate without writing
    Stats {
        #[arg(short, long, default_value = "text.txt")]
        input: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Encode {
            input,
            output,
            verify,
        } => {
            let compressor = RangeCompressor::new().with_verify(verify);

            let t0 = Instant::now();
            let report = compressor.encode_file(&input, &output)?;
            let elapsed = t0.elapsed();

            tracing::info!(
                input = %input.display(),
                output = %output.display(),
                "encode finished"
            );
            println!("Encoding completed.");
            println!(
                "{} -> {} bytes, compression ratio = {:.4}",
                report.input_bytes,
                report.output_bytes,
                report.ratio()
            );
            println!("Time = {:.3} sec", elapsed.as_secs_f64());
        }
        Commands::Decode { input, output } => {
            let compressor = RangeCompressor::new();

            let t0 = Instant::now();
            let report = compressor.decode_file(&input, &output)?;
            let elapsed = t0.elapsed();

            tracing::info!(
                input = %input.display(),
                output = %output.display(),
                "decode finished"
            );
            println!("Decoding completed.");
            println!("{} -> {} bytes", report.input_bytes, report.output_bytes);
            println!("Time = {:.3} sec", elapsed.as_secs_f64());
        }
        Commands::Stats { input } => {
            let data = fs::read(&input)?;
            let model = FrequencyTable::build(&data)?;
            let compressor = RangeCompressor::new();

            println!("Symbols:          {}", model.symbol_count());
            println!("Distinct symbols: {}", model.distinct_symbols());
            println!(
                "Entropy:          {:.4} bits/symbol",
                compressor.bits_per_symbol(&model)
            );
            println!(
                "Estimated size:   {} bytes",
                compressor.estimate_size(&model)
            );
            if model.is_rescaled() {
                println!("Coding total:     {} (rescaled)", model.total());
            }
        }
    }

    Ok(())
}
