use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::error;
use serde::Serialize;

use vlessconv::batch::translate_all;
use vlessconv::export::{suggested_file_name, to_pretty_json, write_config};
use vlessconv::settings::{load_settings, validate_settings, Settings};
use vlessconv::translate::{translate, ConversionResult};

/// Convert vless:// share links into proxy client outbound configs
#[derive(Parser, Debug)]
#[command(name = "vlessconv", version, about, long_about = None)]
struct Cli {
    /// Settings file (YAML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<String>,

    /// Log level, overrides the settings file
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate one link and print or save the config
    Convert {
        link: String,
        /// Write the config to this file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Write the config into this directory, named after the link label
        #[arg(long, value_name = "DIR", conflicts_with = "output")]
        output_dir: Option<PathBuf>,
        /// Print the whole result record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Only report whether a link is well formed
    Check {
        link: String,
        #[arg(long)]
        json: bool,
    },
    /// Translate every link in a file (plain list or base64 subscription)
    Batch {
        #[arg(long, value_name = "FILE")]
        file: String,
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let mut settings = match load_settings(cli.config.as_deref()) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };
    if let Some(level) = cli.log_level.clone() {
        settings.log_level = level;
    }
    if let Err(err) = validate_settings(&settings) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
    env_logger::init_from_env(Env::default().default_filter_or(settings.log_level.clone()));

    let code = match cli.command {
        Command::Convert {
            link,
            output,
            output_dir,
            json,
        } => handle_convert(link.trim(), output, output_dir, json, &settings),
        Command::Check { link, json } => handle_check(link.trim(), json),
        Command::Batch { file, json } => handle_batch(&file, json),
    };
    std::process::exit(code);
}

fn handle_convert(
    link: &str,
    output: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    json: bool,
    settings: &Settings,
) -> i32 {
    let result = translate(link);
    let config = match result.config.as_ref() {
        Some(c) => c,
        None => {
            if json {
                print_record(&result);
            } else {
                eprintln!("{}", result.error_message);
            }
            return 1;
        }
    };

    let dir = output_dir.or_else(|| settings.output_dir.as_ref().map(PathBuf::from));
    let target = output.or_else(|| dir.map(|d| d.join(suggested_file_name(&result.label))));

    match target {
        Some(path) => {
            if let Err(err) = write_config(&path, config) {
                error!("{}", err);
                eprintln!("{}", err);
                return 1;
            }
            if !json {
                println!("config written: {}", path.display());
            }
        }
        None if !json => match to_pretty_json(config) {
            Ok(text) => print!("{}", text),
            Err(err) => {
                eprintln!("{}", err);
                return 1;
            }
        },
        None => {}
    }

    if json {
        print_record(&result);
    }
    0
}

#[derive(Serialize)]
struct CheckResponse {
    ok: bool,
    label: String,
    error: Option<String>,
}

fn handle_check(link: &str, json: bool) -> i32 {
    let result = translate(link);
    if json {
        let payload = CheckResponse {
            ok: result.is_valid,
            label: result.label.clone(),
            error: if result.is_valid {
                None
            } else {
                Some(result.error_message.clone())
            },
        };
        let body = serde_json::to_string(&payload).unwrap_or_else(|_| "{}".to_string());
        println!("{}", body);
    } else if result.is_valid {
        println!("ok: {}", result.label);
    } else {
        eprintln!("{}", result.error_message);
    }
    if result.is_valid {
        0
    } else {
        1
    }
}

fn handle_batch(path: &str, json: bool) -> i32 {
    let content = match fs::read_to_string(Path::new(path)) {
        Ok(c) => c,
        Err(err) => {
            eprintln!("failed to read {}: {}", path, err);
            return 1;
        }
    };

    let results = translate_all(&content);
    if results.is_empty() {
        eprintln!("no links found in {}", path);
        return 1;
    }

    if json {
        let body = serde_json::to_string_pretty(&results).unwrap_or_else(|_| "[]".to_string());
        println!("{}", body);
    } else {
        for (idx, result) in results.iter().enumerate() {
            if result.is_valid {
                println!("{}: ok {}", idx + 1, result.label);
            } else {
                println!("{}: error {}", idx + 1, result.error_message);
            }
        }
    }

    if results.iter().all(|r| r.is_valid) {
        0
    } else {
        1
    }
}

fn print_record(result: &ConversionResult) {
    let body = serde_json::to_string(result).unwrap_or_else(|_| "{}".to_string());
    println!("{}", body);
}
