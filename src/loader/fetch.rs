//! Network acquisition of remote images.

use std::io::Read;

use url::Url;

use crate::error::{DexError, Result};

/// Something that can download the raw bytes behind a remote locator.
pub trait Fetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}

/// Blocking HTTP(S) fetcher.
///
/// No timeout is configured: a stalled download stalls the build.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpFetcher;

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        let response = ureq::get(url.as_str()).call().map_err(|err| {
            let message = match err {
                ureq::Error::Status(code, _response) => {
                    format!("server returned status {code}")
                }
                ureq::Error::Transport(transport) => format!("transport error: {transport}"),
            };
            DexError::Fetch {
                locator: url.to_string(),
                message,
            }
        })?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| DexError::Fetch {
                locator: url.to_string(),
                message: format!("failed to read response body: {e}"),
            })?;

        Ok(bytes)
    }
}
