//! HTTP transport to a PlantUML rendering server.

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::debug;

use super::options::{Format, RenderOptions};
use super::sink::Sink;
use crate::error::{PhaseError, Result};

/// Fetches rendered diagrams from a PlantUML server.
pub struct DiagramClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl DiagramClient {
    /// Create a client for `base_url` with the default 30-second timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a client with a custom timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("phasegraph/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout,
        })
    }

    /// Create a client from rendering options.
    pub fn from_options(options: &RenderOptions) -> Result<Self> {
        Self::with_timeout(options.base_url(), options.timeout())
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the URL serving `encoded` in `format`.
    pub fn url(&self, format: Format, encoded: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            format,
            encoded
        )
    }

    /// GET `url` and stream the body into `sink`.
    ///
    /// Anything but `200 OK` is an [`PhaseError::UnexpectedStatus`] naming
    /// the URL. Returns the number of bytes written. The sink is not closed.
    pub fn fetch_into<S: Sink + ?Sized>(&self, url: &str, sink: &mut S) -> Result<u64> {
        debug!("Requesting diagram from {}", url);

        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|source| PhaseError::Request {
                url: url.to_string(),
                source,
            })?;

        if response.status() != StatusCode::OK {
            return Err(PhaseError::UnexpectedStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let mut buf = [0_u8; 8192];
        let mut written = 0_u64;
        loop {
            let read = response
                .read(&mut buf)
                .map_err(|source| PhaseError::ResponseBody {
                    url: url.to_string(),
                    source,
                })?;
            if read == 0 {
                break;
            }
            sink.write_all(&buf[..read]).map_err(PhaseError::Write)?;
            written += read as u64;
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn default_timeout_is_30_seconds() {
        let client = DiagramClient::new("http://localhost").unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn options_configure_client() {
        let options = RenderOptions {
            timeout: 5,
            ..Default::default()
        };
        let client = DiagramClient::from_options(&options).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(5));
        assert!(client
            .url(Format::Svg, "abc")
            .starts_with("https://www.plantuml.com/plantuml/svg/"));
    }

    #[test]
    fn url_joins_base_format_and_text() {
        let client = DiagramClient::new("http://localhost:8080/plantuml/").unwrap();
        assert_eq!(
            client.url(Format::Png, "SoWk"),
            "http://localhost:8080/plantuml/png/SoWk"
        );
    }

    #[test]
    fn fetch_streams_body_into_sink() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/txt/abc");
            then.status(200).body("ascii diagram");
        });

        let client = DiagramClient::new(server.base_url()).unwrap();
        let mut sink = Vec::new();
        let written = client
            .fetch_into(&client.url(Format::Txt, "abc"), &mut sink)
            .unwrap();

        mock.assert();
        assert_eq!(written, 13);
        assert_eq!(sink, b"ascii diagram");
    }

    #[test]
    fn non_200_status_names_url() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/svg/broken");
            then.status(400);
        });

        let client = DiagramClient::new(server.base_url()).unwrap();
        let url = client.url(Format::Svg, "broken");
        let err = client.fetch_into(&url, &mut Vec::new()).unwrap_err();

        match err {
            PhaseError::UnexpectedStatus { status, url: failed } => {
                assert_eq!(status, 400);
                assert_eq!(failed, url);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unreachable_server_is_request_error() {
        let client =
            DiagramClient::with_timeout("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = client
            .fetch_into(&client.url(Format::Svg, "x"), &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, PhaseError::Request { .. }));
    }
}
