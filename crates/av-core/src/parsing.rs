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

//! Locale-invariant parsing of the string-encoded values the API returns.
//!
//! AlphaVantage encodes nearly every number and timestamp as a JSON string,
//! e.g. `"1. open": "187.1500"`. These helpers turn them into typed values.

use crate::error::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parsing helpers for API string values
pub trait ParseExt {
  /// Parse a decimal such as `"187.1500"` or `"1.5E-4"`
  fn parse_to_decimal(&self) -> Result<Decimal>;

  /// Parse a timestamp; a bare date resolves to midnight
  fn parse_to_datetime(&self) -> Result<NaiveDateTime>;

  /// Parse a 64-bit integer such as a volume
  fn parse_to_i64(&self) -> Result<i64>;

  /// Parse a 32-bit integer
  fn parse_to_i32(&self) -> Result<i32>;
}

impl ParseExt for str {
  fn parse_to_decimal(&self) -> Result<Decimal> {
    let s = self.trim();
    Decimal::from_str(s)
      .or_else(|_| Decimal::from_scientific(s))
      .map_err(|e| Error::Parse(format!("Invalid decimal '{}': {}", s, e)))
  }

  fn parse_to_datetime(&self) -> Result<NaiveDateTime> {
    let s = self.trim();
    for format in DATETIME_FORMATS {
      if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
        return Ok(dt);
      }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
      .ok()
      .and_then(|d| d.and_hms_opt(0, 0, 0))
      .ok_or_else(|| Error::Parse(format!("Invalid datetime '{}'", s)))
  }

  fn parse_to_i64(&self) -> Result<i64> {
    let s = self.trim();
    s.parse().map_err(|e| Error::Parse(format!("Invalid integer '{}': {}", s, e)))
  }

  fn parse_to_i32(&self) -> Result<i32> {
    let s = self.trim();
    s.parse().map_err(|e| Error::Parse(format!("Invalid integer '{}': {}", s, e)))
  }
}
