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

use crate::config::Config;
use anyhow::{Context, Result};
use av_client::AlphaVantageClient;
use av_core::ApiFunction;
use clap::Args;
use std::collections::HashMap;
use tracing::info;

#[derive(Args, Debug)]
pub struct QueryCommand {
  /// API function, e.g. TIME_SERIES_DAILY or GLOBAL_QUOTE
  #[arg(value_parser = parse_function)]
  pub function: ApiFunction,

  /// Query parameter as key=value, may be repeated
  #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
  pub params: Vec<(String, String)>,

  /// Strip ordinal prefixes such as "1. " from field names
  #[arg(short, long)]
  pub normalize: bool,

  /// Print the response body as received instead of pretty-printed JSON
  #[arg(long)]
  pub raw: bool,
}

fn parse_function(s: &str) -> std::result::Result<ApiFunction, String> {
  s.parse().map_err(|e: av_core::Error| e.to_string())
}

fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
  let (key, value) =
    s.split_once('=').ok_or_else(|| format!("invalid key=value pair: no '=' found in '{}'", s))?;
  if key.is_empty() {
    return Err(format!("invalid key=value pair: empty key in '{}'", s));
  }
  Ok((key.to_string(), value.to_string()))
}

pub async fn execute(cmd: QueryCommand, config: Config) -> Result<()> {
  let client =
    AlphaVantageClient::new(config.api_config).context("Failed to create AlphaVantage client")?;

  let query: HashMap<String, String> = cmd.params.into_iter().collect();
  let query = (!query.is_empty()).then_some(query);
  info!("Querying {} with {} parameter(s)", cmd.function, query.as_ref().map_or(0, |q| q.len()));

  let output = if cmd.raw {
    client.request_raw_json(cmd.function, query.as_ref(), cmd.normalize).await
  } else {
    client
      .request_parsed_json(cmd.function, query.as_ref(), cmd.normalize)
      .await
      .and_then(|doc| serde_json::to_string_pretty(&doc).map_err(Into::into))
  };
  client.close();

  let output = output.with_context(|| format!("{} request failed", cmd.function))?;
  println!("{}", output);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_key_val() {
    assert_eq!(parse_key_val("symbol=IBM").unwrap(), ("symbol".to_string(), "IBM".to_string()));
    assert_eq!(
      parse_key_val("tickers=a=b").unwrap(),
      ("tickers".to_string(), "a=b".to_string())
    );
    assert_eq!(parse_key_val("empty=").unwrap(), ("empty".to_string(), String::new()));
    assert!(parse_key_val("symbol").is_err());
    assert!(parse_key_val("=IBM").is_err());
  }

  #[test]
  fn test_parse_function() {
    assert_eq!(parse_function("global_quote").unwrap(), ApiFunction::GlobalQuote);
    assert!(parse_function("NOPE").unwrap_err().contains("NOPE"));
  }
}
