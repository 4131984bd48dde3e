//! Promo CLI Client
//!
//! Interactive command-line client for the promo discount-code server.
//!
//! # Usage
//!
//! ```bash
//! # Connect to local server
//! promo
//!
//! # Connect to remote server
//! promo --host example.com --port 6001
//!
//! # Execute single command
//! promo -c "GENERATE 5 8"
//! ```

use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Promo Command Line Interface
#[derive(Parser, Debug)]
#[command(name = "promo")]
#[command(author, version, about = "Promo CLI - discount code server client")]
struct Args {
    /// Server hostname
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "PROMO_HOST")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "6001", env = "PROMO_PORT")]
    port: u16,

    /// Execute command and exit
    #[arg(short, long)]
    command: Option<String>,

    /// Quiet mode (no banner)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let addr = format!("{}:{}", args.host, args.port);
    let mut stream = connect(&addr, args.quiet)?;

    if !args.quiet {
        println!(
            "{}",
            format!(
                r#"
  ╔═╗╦═╗╔═╗╔╦╗╔═╗  CLI
  ╠═╝╠╦╝║ ║║║║║ ║  Connected to {}
  ╩  ╩╚═╚═╝╩ ╩╚═╝  Type 'help' for commands, 'quit' to exit
"#,
                addr
            )
            .cyan()
        );
    }

    // Single command mode
    if let Some(cmd) = args.command {
        return execute_command(&mut stream, &cmd);
    }

    // Interactive mode
    let mut rl = DefaultEditor::new()?;
    let history_path = dirs_next::home_dir()
        .map(|p| p.join(".promo_history"))
        .unwrap_or_default();

    let _ = rl.load_history(&history_path);

    loop {
        let prompt = format!("{}> ", "promo".green());
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Handle local commands
                match line.to_uppercase().as_str() {
                    "QUIT" | "EXIT" => {
                        let _ = execute_command(&mut stream, "EXIT");
                        break;
                    }
                    "HELP" => {
                        print_help();
                        continue;
                    }
                    "CLEAR" => {
                        print!("\x1B[2J\x1B[1;1H");
                        continue;
                    }
                    _ => {}
                }

                // Execute remote command
                if let Err(e) = execute_command(&mut stream, line) {
                    eprintln!("{} {}", "Error:".red(), e);

                    // Try to reconnect
                    match connect(&addr, true) {
                        Ok(new_stream) => {
                            stream = new_stream;
                            println!("{}", "Reconnected.".yellow());
                        }
                        Err(_) => {
                            eprintln!("{}", "Connection lost.".red());
                            break;
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(&history_path);
    Ok(())
}

/// Connect and consume the greeting line the server sends first
fn connect(addr: &str, quiet: bool) -> Result<TcpStream> {
    let stream =
        TcpStream::connect(addr).with_context(|| format!("Failed to connect to {}", addr))?;
    stream.set_read_timeout(Some(std::time::Duration::from_secs(5)))?;

    let mut reader = BufReader::new(stream.try_clone()?);
    let mut banner = String::new();
    reader.read_line(&mut banner)?;
    if !quiet {
        println!("{}", banner.trim().dimmed());
    }

    Ok(stream)
}

fn execute_command(stream: &mut TcpStream, cmd: &str) -> Result<()> {
    // Send command
    writeln!(stream, "{}", cmd)?;
    stream.flush()?;

    // Read response
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut response = String::new();
    if reader.read_line(&mut response)? == 0 {
        anyhow::bail!("server closed the connection");
    }

    // Parse and display response
    let response = response.trim_end();

    if let Some(codes) = response.strip_prefix("true ") {
        for (i, code) in codes.split(',').enumerate() {
            println!("{}) {}", i + 1, code.green());
        }
    } else if response == "false" {
        println!("{}", "false".red());
    } else if response.starts_with("SUCCESS:") {
        println!("{}", response.green());
    } else if response.starts_with("ERROR:") {
        println!("{}", response.red());
    } else if response == "Goodbye!" {
        println!("{}", response.dimmed());
    } else {
        println!("{}", response);
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"
{}

{}
  GENERATE <count> [7|8]   Generate new discount codes (count 1-2000)
  USE <code>               Redeem a code exactly once
  EXIT                     Close connection

{}
  help                     Show this help
  clear                    Clear screen
  quit/exit                Exit CLI
"#,
        "Promo Commands".cyan().bold(),
        "Server".yellow().bold(),
        "Local".yellow().bold(),
    );
}

// Minimal dirs_next replacement for home directory
mod dirs_next {
    use std::path::PathBuf;

    pub fn home_dir() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(PathBuf::from)
    }
}
