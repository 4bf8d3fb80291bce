use crate::downloader::error::DownloadError;
use log::debug;
use reqwest::blocking::Client;
use std::time::Duration;

/// Raw answer of the TMY service. The body is never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmyResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TmyResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one blocking GET per call.
pub trait TmyFetcher {
    fn fetch(&self, url: &str) -> Result<TmyResponse, DownloadError>;
}

impl<F: TmyFetcher + ?Sized> TmyFetcher for &F {
    fn fetch(&self, url: &str) -> Result<TmyResponse, DownloadError> {
        (**self).fetch(url)
    }
}

/// [`TmyFetcher`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a client with the given request timeout; `None` waits forever.
    pub fn new(timeout: Option<Duration>) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DownloadError::ClientBuild)?;
        Ok(Self { client })
    }
}

impl TmyFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<TmyResponse, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| DownloadError::NetworkRequest(url.to_string(), e))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| DownloadError::ResponseBody(url.to_string(), e))?;
        debug!("Received {} bytes with status {} from {}", body.len(), status, url);
        Ok(TmyResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(TmyResponse::new(200, "x").is_success());
        assert!(TmyResponse::new(204, Vec::new()).is_success());
        assert!(!TmyResponse::new(400, "bad request").is_success());
        assert!(!TmyResponse::new(503, "").is_success());
    }

    #[test]
    fn test_unreachable_host_is_network_error() -> Result<(), DownloadError> {
        let fetcher = HttpFetcher::new(Some(Duration::from_secs(5)))?;
        // Nothing listens on the discard port.
        let result = fetcher.fetch("http://127.0.0.1:9/api/v5_2/tmy?lat=0&lon=0&outputformat=csv");
        assert!(matches!(result, Err(DownloadError::NetworkRequest(_, _))));
        Ok(())
    }
}
