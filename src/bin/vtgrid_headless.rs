//! vtgrid Headless Runner
//!
//! Feeds a recorded byte stream through the engine and prints the resulting
//! screen. Reads input from a file argument or stdin.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use vtgrid::{Config, Terminal};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut config = Config::default();
    let mut config_path: Option<PathBuf> = None;
    let mut cols: Option<usize> = None;
    let mut rows: Option<usize> = None;
    let mut scrollback: Option<usize> = None;
    let mut chunk_size: Option<usize> = None;
    let mut offset = 0usize;
    let mut input_file: Option<String> = None;
    let mut output_format = OutputFormat::Text;
    let mut show_help = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--cols" => {
                i += 1;
                cols = args.get(i).and_then(|v| v.parse().ok());
            }
            "-r" | "--rows" => {
                i += 1;
                rows = args.get(i).and_then(|v| v.parse().ok());
            }
            "-s" | "--scrollback" => {
                i += 1;
                scrollback = args.get(i).and_then(|v| v.parse().ok());
            }
            "--config" => {
                i += 1;
                config_path = args.get(i).map(PathBuf::from);
            }
            "-k" | "--chunk" => {
                i += 1;
                chunk_size = args.get(i).and_then(|v| v.parse().ok());
            }
            "-o" | "--offset" => {
                i += 1;
                offset = args.get(i).and_then(|v| v.parse().ok()).unwrap_or(0);
            }
            "-j" | "--json" => output_format = OutputFormat::Json,
            "-t" | "--text" => output_format = OutputFormat::Text,
            "-h" | "--help" => show_help = true,
            arg => {
                if input_file.is_none() && !arg.starts_with('-') {
                    input_file = Some(arg.to_string());
                }
            }
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if let Some(path) = &config_path {
        config = Config::load_or_default(path);
    }
    if let Some(cols) = cols {
        config.columns = cols;
    }
    if let Some(rows) = rows {
        config.rows = rows;
    }
    if let Some(scrollback) = scrollback {
        config.scrollback_lines = scrollback;
    }

    let mut terminal = match Terminal::with_config(&config) {
        Ok(terminal) => terminal,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let input_data = match &input_file {
        Some(path) => match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            let mut data = Vec::new();
            if let Err(e) = io::stdin().read_to_end(&mut data) {
                eprintln!("Error reading stdin: {}", e);
                return ExitCode::FAILURE;
            }
            data
        }
    };

    match chunk_size {
        Some(size) if size > 0 => {
            for chunk in input_data.chunks(size) {
                terminal.process_chunk(chunk);
            }
        }
        _ => terminal.process_chunk(&input_data),
    }

    match output_format {
        OutputFormat::Text => {
            let view = terminal.snapshot_view(offset);
            let screen = terminal.screen();
            println!("Terminal State ({}x{}):", screen.width(), screen.height());
            match view.cursor() {
                Some((x, y)) => println!("Cursor: ({}, {})", y, x),
                None => println!("Cursor: hidden in scrollback"),
            }
            println!("Scrollback: {} lines", screen.scrollback_len());
            if !terminal.title().is_empty() {
                println!("Title: {}", terminal.title());
            }
            println!("---");
            for row in view.rows() {
                let line: String = row.iter().map(|cell| cell.ch).collect();
                println!("{}", line.trim_end());
            }
            println!("---");
        }
        OutputFormat::Json => match terminal.state().to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing screen state: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}

#[derive(Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn print_help() {
    println!("vtgrid Headless Runner");
    println!();
    println!("Usage: vtgrid-headless [OPTIONS] [INPUT_FILE]");
    println!();
    println!("Options:");
    println!("  -c, --cols <N>        Set terminal width (default: 80)");
    println!("  -r, --rows <N>        Set terminal height (default: 24)");
    println!("  -s, --scrollback <N>  Set scrollback capacity (default: 10000)");
    println!("      --config <PATH>   Load configuration from a JSON file");
    println!("  -k, --chunk <N>       Feed input in chunks of N bytes");
    println!("  -o, --offset <N>      Show the screen N lines back in scrollback");
    println!("  -j, --json            Output screen state as JSON");
    println!("  -t, --text            Output screen as text (default)");
    println!("  -h, --help            Show this help message");
    println!();
    println!("If no input file is specified, reads from stdin.");
    println!();
    println!("Examples:");
    println!("  printf 'Hello\\x1b[31mWorld\\x1b[0m' | vtgrid-headless");
    println!("  vtgrid-headless -c 120 -r 40 -k 7 session.bin");
    println!("  vtgrid-headless --json < session.bin > state.json");
}
