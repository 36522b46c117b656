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

//! Request composition for AlphaVantage API calls

use av_core::{ApiFunction, API_KEY_QUERY_VAR, FUNCTION_QUERY_VAR};
use reqwest::Method;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use url::Url;

const REDACTED: &str = "***";

/// A fully composed HTTP request, ready to hand to a [`Transport`](crate::transport::Transport)
#[derive(Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
  method: Method,
  url: Url,
}

impl RequestDescriptor {
  /// HTTP method, always `GET` for this API
  pub fn method(&self) -> &Method {
    &self.method
  }

  /// Target URL including every query parameter and the API key
  pub fn url(&self) -> &Url {
    &self.url
  }

  /// Decoded query parameters
  pub fn query_params(&self) -> HashMap<String, String> {
    self.url.query_pairs().into_owned().collect()
  }

  /// The target URL with the API key value masked, suitable for logs
  pub fn redacted_url(&self) -> String {
    let mut url = self.url.clone();
    let pairs: Vec<(String, String)> = self.url.query_pairs().into_owned().collect();
    {
      let mut query = url.query_pairs_mut();
      query.clear();
      for (key, value) in &pairs {
        let value = if key == API_KEY_QUERY_VAR { REDACTED } else { value.as_str() };
        query.append_pair(key, value);
      }
    }
    url.to_string()
  }
}

impl fmt::Display for RequestDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.method, self.redacted_url())
  }
}

impl fmt::Debug for RequestDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RequestDescriptor")
      .field("method", &self.method)
      .field("url", &self.redacted_url())
      .finish()
  }
}

/// Build the GET request for an API call
///
/// Caller parameters are copied first; the `apikey` and `function` entries are
/// written last and replace any caller-supplied values under those names.
/// Keys and values are form-urlencoded and appended to `base_url` in key order.
///
/// # Arguments
///
/// * `base_url` - Service endpoint, e.g. `https://www.alphavantage.co/query`
/// * `api_key` - Key embedded in the URL; an empty key is sent as-is
/// * `function` - The API function to invoke
/// * `query` - Optional extra parameters such as `symbol` or `interval`
pub fn build_request(
  base_url: &Url,
  api_key: &str,
  function: ApiFunction,
  query: Option<&HashMap<String, String>>,
) -> RequestDescriptor {
  let mut params: BTreeMap<&str, &str> = query
    .map(|q| q.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect())
    .unwrap_or_default();

  params.insert(API_KEY_QUERY_VAR, api_key);
  params.insert(FUNCTION_QUERY_VAR, function.as_str());

  let mut url = base_url.clone();
  {
    let mut query_pairs = url.query_pairs_mut();
    for (key, value) in params {
      query_pairs.append_pair(key, value);
    }
  }

  RequestDescriptor { method: Method::GET, url }
}
