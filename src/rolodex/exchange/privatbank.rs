use super::{ExchangeDay, RateSource};
use crate::error::{Result, RolodexError};
use crate::model::DATE_FORMAT;
use chrono::NaiveDate;
use reqwest::blocking::Client;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.privatbank.ua/p24api/exchange_rates";
pub const API_URL_ENV: &str = "RATES_API_URL";

const TIMEOUT_SECS: u64 = 15;

/// Blocking client for the PrivatBank archive endpoint.
#[derive(Clone)]
pub struct PrivatBankClient {
    client: Client,
    base_url: String,
}

impl PrivatBankClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Base URL from `RATES_API_URL`, or the public endpoint.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.into());
        Self::new(base_url)
    }

    pub fn day_url(&self, date: NaiveDate) -> String {
        format!("{}?json&date={}", self.base_url, date.format(DATE_FORMAT))
    }
}

impl RateSource for PrivatBankClient {
    fn fetch_day(&self, date: NaiveDate) -> Result<ExchangeDay> {
        let url = self.day_url(date);
        let res = self.client.get(&url).send()?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().unwrap_or_default();
            return Err(RolodexError::Api { status, body });
        }
        Ok(res.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 512];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{}/rates", addr)
    }

    #[test]
    fn non_success_status_is_an_api_error() {
        let url = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 4\r\nConnection: close\r\n\r\ndown",
        );
        let client = PrivatBankClient::new(url).unwrap();
        let date = NaiveDate::from_ymd_opt(2014, 12, 1).unwrap();
        let err = client.fetch_day(date).unwrap_err();
        assert!(matches!(err, RolodexError::Api { status: 503, ref body } if body == "down"));
        assert!(!err.is_user_facing());
    }

    #[test]
    fn builds_dated_url() {
        let client = PrivatBankClient::new("http://localhost:9/rates").unwrap();
        let date = NaiveDate::from_ymd_opt(2014, 12, 1).unwrap();
        assert_eq!(
            client.day_url(date),
            "http://localhost:9/rates?json&date=01.12.2014"
        );
    }
}
