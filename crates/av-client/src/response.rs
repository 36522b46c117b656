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

//! Response checks and clean-up applied to raw AlphaVantage bodies

use av_core::{Error, Result, ERROR_MARKER};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Matches an ordinal key prefix such as `"1. `, `"5a: ` or `"10. ` right
/// after an opening quote.
static SEQUENCE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?m)"(\d+)(\.)?(\d+)?[a-z]?[.:]\s"#).expect("sequence prefix pattern is valid")
});

/// Fail with [`Error::Api`] when the body contains the service's error marker
///
/// This is a plain substring scan, not a JSON lookup: a payload whose data
/// happens to contain `Error Message` is rejected as well.
pub fn assert_not_error(body: &str) -> Result<()> {
  if body.contains(ERROR_MARKER) {
    return Err(Error::Api { body: body.to_string() });
  }
  Ok(())
}

/// Strip ordinal prefixes from keys, e.g. `"1. open"` becomes `"open"`
///
/// Works on text, so the input need not be valid JSON. Only the quote,
/// prefix, separator and the single whitespace after it are touched.
pub fn strip_sequence_prefixes(body: &str) -> String {
  SEQUENCE_PREFIX.replace_all(body, "\"").into_owned()
}

/// Parse response text into a JSON document
pub fn parse_document(text: &str) -> Result<Value> {
  Ok(serde_json::from_str(text)?)
}
