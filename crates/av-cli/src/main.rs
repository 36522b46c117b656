/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

mod commands;
use commands::query::QueryCommand;

mod config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "av-cli")]
#[command(propagate_version = true)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Verbose output
  #[arg(short, long, global = true)]
  verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Call an API function and print the response
  Query(QueryCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
  // Load environment variables
  dotenv().ok();

  // Parse CLI arguments
  let cli = Cli::parse();

  // Initialize logging; RUST_LOG wins over the verbosity flag
  let log_level = if cli.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

  // Load configuration
  let config = config::Config::from_env()?;

  // Execute command
  match cli.command {
    Commands::Query(cmd) => commands::query::execute(cmd, config).await?,
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use av_core::ApiFunction;
  use clap::CommandFactory;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_query_command() {
    let cli = Cli::try_parse_from([
      "av", "query", "time_series_daily", "-p", "symbol=IBM", "--param", "outputsize=full", "-n",
    ])
    .unwrap();

    let Commands::Query(cmd) = cli.command;
    assert_eq!(cmd.function, ApiFunction::TimeSeriesDaily);
    assert_eq!(
      cmd.params,
      vec![
        ("symbol".to_string(), "IBM".to_string()),
        ("outputsize".to_string(), "full".to_string())
      ]
    );
    assert!(cmd.normalize);
    assert!(!cmd.raw);
    assert!(!cli.verbose);
  }

  #[test]
  fn test_rejects_unknown_function() {
    assert!(Cli::try_parse_from(["av", "query", "NOT_REAL"]).is_err());
  }

  #[test]
  fn test_rejects_malformed_param() {
    assert!(Cli::try_parse_from(["av", "query", "OVERVIEW", "-p", "symbol"]).is_err());
  }
}
