//! # Exchange Rates
//!
//! Collects National Bank exchange rates for the last few days.
//!
//! The API is keyed by date (`DD.MM.YYYY`) and answers with an object holding
//! an `exchangeRate` list. [`RateSource`] is the seam between the HTTP client
//! and the aggregation in [`collect_rates`], so the latter is tested without
//! a network.
//!
//! Output shape, newest day first:
//!
//! ```text
//! [
//!   { "17.10.2026": { "EUR": { "sale": 44.1, "purchase": 44.1 },
//!                     "USD": { "sale": 41.2, "purchase": 41.2 } } },
//!   ...
//! ]
//! ```

use crate::error::{Result, RolodexError};
use crate::model::DATE_FORMAT;
use chrono::{Duration, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use std::thread;

pub mod privatbank;

pub const MAX_DAYS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RateEntry {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(rename = "saleRateNB")]
    pub sale_rate_nb: f64,
    #[serde(rename = "purchaseRateNB")]
    pub purchase_rate_nb: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExchangeDay {
    #[serde(default)]
    pub date: String,
    #[serde(rename = "exchangeRate", default)]
    pub exchange_rate: Vec<RateEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rate {
    pub sale: f64,
    pub purchase: f64,
}

/// Rates for one day, keyed by date then currency code.
pub type DayRates = BTreeMap<String, BTreeMap<String, Rate>>;

/// Anything that can answer "what were the rates on this date".
pub trait RateSource: Sync {
    fn fetch_day(&self, date: NaiveDate) -> Result<ExchangeDay>;
}

/// Fetch the `days` most recent dates ending at `today`, one request per day
/// issued in parallel, keeping only `currencies`.
pub fn collect_rates<S: RateSource>(
    source: &S,
    today: NaiveDate,
    days: u32,
    currencies: &[String],
) -> Result<Vec<DayRates>> {
    if days == 0 || days > MAX_DAYS {
        return Err(RolodexError::validation(
            "days",
            format!("{} is not between 1 and {}", days, MAX_DAYS),
        ));
    }
    let wanted: Vec<String> = currencies.iter().map(|c| c.trim().to_uppercase()).collect();
    let dates: Vec<NaiveDate> = (0..days)
        .map(|offset| today - Duration::days(i64::from(offset)))
        .collect();

    let fetched: Vec<Result<ExchangeDay>> = thread::scope(|scope| {
        let handles: Vec<_> = dates
            .iter()
            .map(|date| scope.spawn(move || source.fetch_day(*date)))
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle.join().unwrap_or_else(|_| {
                    Err(io::Error::new(io::ErrorKind::Other, "rate fetch thread panicked").into())
                })
            })
            .collect()
    });

    dates
        .iter()
        .zip(fetched)
        .map(|(date, day)| {
            let day = day?;
            let key = date.format(DATE_FORMAT).to_string();
            debug!("{}: {} rates received", key, day.exchange_rate.len());
            let mut day_rates = DayRates::new();
            day_rates.insert(key, select(&day, &wanted));
            Ok(day_rates)
        })
        .collect()
}

fn select(day: &ExchangeDay, wanted: &[String]) -> BTreeMap<String, Rate> {
    day.exchange_rate
        .iter()
        .filter_map(|entry| {
            let code = entry.currency.as_deref()?.to_uppercase();
            if !wanted.contains(&code) {
                return None;
            }
            Some((
                code,
                Rate {
                    sale: entry.sale_rate_nb,
                    purchase: entry.purchase_rate_nb,
                },
            ))
        })
        .collect()
}

pub fn write_rates<P: AsRef<Path>>(path: P, rates: &[DayRates]) -> Result<()> {
    let content = serde_json::to_string_pretty(rates)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Fixed(HashMap<NaiveDate, ExchangeDay>);

    impl RateSource for Fixed {
        fn fetch_day(&self, date: NaiveDate) -> Result<ExchangeDay> {
            self.0
                .get(&date)
                .cloned()
                .ok_or_else(|| RolodexError::NotFound(date.to_string()))
        }
    }

    fn entry(currency: Option<&str>, sale: f64, purchase: f64) -> RateEntry {
        RateEntry {
            currency: currency.map(str::to_string),
            sale_rate_nb: sale,
            purchase_rate_nb: purchase,
        }
    }

    fn date(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn source() -> Fixed {
        let mut days = HashMap::new();
        days.insert(
            date(2, 1, 2024),
            ExchangeDay {
                date: "02.01.2024".into(),
                exchange_rate: vec![
                    entry(None, 1.0, 1.0),
                    entry(Some("EUR"), 41.5, 41.4),
                    entry(Some("USD"), 37.9, 37.8),
                    entry(Some("PLN"), 9.5, 9.4),
                ],
            },
        );
        days.insert(
            date(1, 1, 2024),
            ExchangeDay {
                date: "01.01.2024".into(),
                exchange_rate: vec![entry(Some("EUR"), 41.0, 40.9)],
            },
        );
        Fixed(days)
    }

    #[test]
    fn collects_newest_first_and_filters_currencies() {
        let wanted = vec!["eur".to_string(), "USD".to_string()];
        let rates = collect_rates(&source(), date(2, 1, 2024), 2, &wanted).unwrap();

        assert_eq!(rates.len(), 2);
        let newest = &rates[0]["02.01.2024"];
        assert_eq!(newest.len(), 2);
        assert_eq!(newest["EUR"], Rate { sale: 41.5, purchase: 41.4 });
        assert!(!newest.contains_key("PLN"));

        let older = &rates[1]["01.01.2024"];
        assert_eq!(older.len(), 1);
        assert!(!older.contains_key("USD"));
    }

    #[test]
    fn rejects_out_of_range_days() {
        let wanted = vec!["EUR".to_string()];
        assert!(collect_rates(&source(), date(2, 1, 2024), 0, &wanted).is_err());
        assert!(collect_rates(&source(), date(2, 1, 2024), 11, &wanted).is_err());
    }

    #[test]
    fn a_failed_day_fails_the_batch() {
        let wanted = vec!["EUR".to_string()];
        let err = collect_rates(&source(), date(2, 1, 2024), 3, &wanted).unwrap_err();
        assert!(matches!(err, RolodexError::NotFound(_)));
    }

    #[test]
    fn parses_api_payload() {
        let payload = r#"{
            "date": "01.12.2014",
            "bank": "PB",
            "baseCurrency": 980,
            "baseCurrencyLit": "UAH",
            "exchangeRate": [
                {"baseCurrency": "UAH", "saleRateNB": 1.0, "purchaseRateNB": 1.0},
                {"baseCurrency": "UAH", "currency": "EUR", "saleRateNB": 18.79,
                 "purchaseRateNB": 18.79, "saleRate": 20.0, "purchaseRate": 19.2}
            ]
        }"#;
        let day: ExchangeDay = serde_json::from_str(payload).unwrap();
        assert_eq!(day.date, "01.12.2014");
        assert_eq!(day.exchange_rate.len(), 2);
        assert_eq!(day.exchange_rate[1].currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn writes_json_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("rates.json");
        let wanted = vec!["EUR".to_string()];
        let rates = collect_rates(&source(), date(2, 1, 2024), 1, &wanted).unwrap();
        write_rates(&path, &rates).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value[0]["02.01.2024"]["EUR"]["sale"], 41.5);
    }
}
