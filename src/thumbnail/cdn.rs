use crate::Error;
use reqwest::blocking::Client;
use std::fmt::Debug;
use std::time::Duration;

/// Where thumbnails come from.
pub(crate) trait Cdn: Debug + Send + Sync {
    /// Whether the image at `url` loads.
    fn probe(&self, url: &str) -> bool;
    fn fetch(&self, url: &str) -> Result<Vec<u8>, Error>;
}

#[derive(Debug, Clone)]
pub(crate) struct HttpCdn {
    client: Client,
}

impl HttpCdn {
    pub(crate) fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Cdn for HttpCdn {
    fn probe(&self, url: &str) -> bool {
        match self.client.get(url).send() {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>, Error> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}
