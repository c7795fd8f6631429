//! # FastInput Host Daemon
//!
//! Main entry point for the FastInput host runtime.

use fastinputd::{HostRuntime, HostRuntimeConfig};
use services_settings::FastInputSettings;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    let config = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(&args[0]);
        process::exit(1);
    });

    let runtime = HostRuntime::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to create runtime: {}", e);
        process::exit(1);
    });

    match runtime.run() {
        Ok(report) => {
            if let Some(text) = report.final_text {
                println!("{}", text);
            }
        }
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            process::exit(1);
        }
    }
}

fn parse_args(args: &[String]) -> Result<HostRuntimeConfig, String> {
    let mut settings = None;
    let mut script = None;
    let mut endpoint = None;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --config".to_string());
                }
                settings = Some(
                    FastInputSettings::from_path(&args[i])
                        .map_err(|e| format!("Failed to load settings: {}", e))?,
                );
            }
            "--script" | "-s" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --script".to_string());
                }
                let script_text = fs::read_to_string(&args[i])
                    .map_err(|e| format!("Failed to read script file: {}", e))?;
                script = Some(script_text);
            }
            "--endpoint" | "-e" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --endpoint".to_string());
                }
                endpoint = Some(args[i].clone());
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    let mut settings = settings.unwrap_or_default();
    if let Some(endpoint) = endpoint {
        settings.notify.endpoint = endpoint;
    }

    let script = match script {
        Some(script) => script,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("Failed to read script from stdin: {}", e))?;
            text
        }
    };

    Ok(HostRuntimeConfig {
        settings,
        script,
        init_logging: true,
    })
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <FILE>      Settings file (JSON)");
    eprintln!("  -s, --script <FILE>      Broadcast script (default: stdin)");
    eprintln!("  -e, --endpoint <URL>     Focus notification endpoint");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --script demos/hello.fiscript", program);
    eprintln!(
        "  echo 'focus start' | {} --endpoint http://127.0.0.1:7912/whatsinput",
        program
    );
}
