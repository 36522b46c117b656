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

//! AlphaVantage API function identifiers

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Declares the `ApiFunction` enum together with its canonical wire names.
///
/// Every variant maps to exactly one wire name and back, so `Display` and
/// `FromStr` stay in lockstep.
macro_rules! api_functions {
  ($( $(#[$meta:meta])* $variant:ident => $wire:literal, )+) => {
    /// The AlphaVantage API functions this client can invoke.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub enum ApiFunction {
      $( $(#[$meta])* $variant, )+
    }

    impl ApiFunction {
      /// Every known function, in declaration order
      pub const ALL: &'static [ApiFunction] = &[ $( ApiFunction::$variant, )+ ];

      /// Canonical name sent as the `function` query parameter
      pub const fn as_str(&self) -> &'static str {
        match self {
          $( ApiFunction::$variant => $wire, )+
        }
      }
    }

    impl FromStr for ApiFunction {
      type Err = Error;

      fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
          $( $wire => Ok(ApiFunction::$variant), )+
          other => Err(Error::Parse(format!("Unknown API function: {}", other))),
        }
      }
    }
  };
}

api_functions! {
  // Time Series functions
  TimeSeriesIntraday => "TIME_SERIES_INTRADAY",
  TimeSeriesIntradayExtended => "TIME_SERIES_INTRADAY_EXTENDED",
  TimeSeriesDaily => "TIME_SERIES_DAILY",
  TimeSeriesDailyAdjusted => "TIME_SERIES_DAILY_ADJUSTED",
  TimeSeriesWeekly => "TIME_SERIES_WEEKLY",
  TimeSeriesWeeklyAdjusted => "TIME_SERIES_WEEKLY_ADJUSTED",
  TimeSeriesMonthly => "TIME_SERIES_MONTHLY",
  TimeSeriesMonthlyAdjusted => "TIME_SERIES_MONTHLY_ADJUSTED",
  /// Latest price and volume for a single symbol
  GlobalQuote => "GLOBAL_QUOTE",
  SymbolSearch => "SYMBOL_SEARCH",
  MarketStatus => "MARKET_STATUS",

  // Fundamentals functions
  Overview => "OVERVIEW",
  IncomeStatement => "INCOME_STATEMENT",
  BalanceSheet => "BALANCE_SHEET",
  CashFlow => "CASH_FLOW",
  Earnings => "EARNINGS",
  ListingStatus => "LISTING_STATUS",
  EarningsCalendar => "EARNINGS_CALENDAR",
  IpoCalendar => "IPO_CALENDAR",
  TopGainersLosers => "TOP_GAINERS_LOSERS",

  // News functions
  NewsSentiment => "NEWS_SENTIMENT",

  // Forex functions
  CurrencyExchangeRate => "CURRENCY_EXCHANGE_RATE",
  FxIntraday => "FX_INTRADAY",
  FxDaily => "FX_DAILY",
  FxWeekly => "FX_WEEKLY",
  FxMonthly => "FX_MONTHLY",

  // Crypto functions
  CryptoRating => "CRYPTO_RATING",
  CryptoIntraday => "CRYPTO_INTRADAY",
  DigitalCurrencyDaily => "DIGITAL_CURRENCY_DAILY",
  DigitalCurrencyWeekly => "DIGITAL_CURRENCY_WEEKLY",
  DigitalCurrencyMonthly => "DIGITAL_CURRENCY_MONTHLY",

  // Technical indicators
  Sma => "SMA",
  Ema => "EMA",
  Wma => "WMA",
  Vwap => "VWAP",
  Macd => "MACD",
  Stoch => "STOCH",
  Rsi => "RSI",
  Adx => "ADX",
  Cci => "CCI",
  Aroon => "AROON",
  Bbands => "BBANDS",
  Ad => "AD",
  Obv => "OBV",

  // Economic indicators
  RealGdp => "REAL_GDP",
  RealGdpPerCapita => "REAL_GDP_PER_CAPITA",
  TreasuryYield => "TREASURY_YIELD",
  FederalFundsRate => "FEDERAL_FUNDS_RATE",
  Cpi => "CPI",
  Inflation => "INFLATION",
  RetailSales => "RETAIL_SALES",
  Unemployment => "UNEMPLOYMENT",
}

impl fmt::Display for ApiFunction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn test_display_uses_wire_name() {
    assert_eq!(ApiFunction::TimeSeriesDaily.to_string(), "TIME_SERIES_DAILY");
    assert_eq!(ApiFunction::DigitalCurrencyDaily.to_string(), "DIGITAL_CURRENCY_DAILY");
    assert_eq!(ApiFunction::GlobalQuote.as_str(), "GLOBAL_QUOTE");
  }

  #[test]
  fn test_from_str_round_trips_every_function() {
    for function in ApiFunction::ALL {
      let parsed: ApiFunction = function.as_str().parse().unwrap();
      assert_eq!(parsed, *function);
    }
  }

  #[test]
  fn test_from_str_is_case_insensitive() {
    let parsed: ApiFunction = " time_series_weekly ".parse().unwrap();
    assert_eq!(parsed, ApiFunction::TimeSeriesWeekly);
  }

  #[test]
  fn test_from_str_rejects_unknown() {
    let result = "NOT_A_FUNCTION".parse::<ApiFunction>();
    assert!(matches!(result, Err(Error::Parse(_))));
  }

  #[test]
  fn test_wire_names_are_unique() {
    let names: HashSet<&str> = ApiFunction::ALL.iter().map(|f| f.as_str()).collect();
    assert_eq!(names.len(), ApiFunction::ALL.len());
  }
}
