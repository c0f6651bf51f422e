// Remote asset fetcher for pvreplace
// Uses reqwest to pull the default config.yaml / ignore-lines.txt from the project's raw file host

use reqwest::{Client, StatusCode};

use crate::error::{PvError, Result};

pub const ASSET_BASE_URL: &str = "https://raw.githubusercontent.com/rix4uni/pvreplace/refs/heads/main";

pub struct AssetFetcher {
    pub client: Client,
    pub base_url: String,
}

impl AssetFetcher {
    pub fn new() -> Self {
        Self::with_base_url(ASSET_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn asset_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    /// Body of the named asset. Anything but 200 OK is an error.
    pub async fn fetch(&self, name: &str) -> Result<Vec<u8>> {
        let download_err = |source: reqwest::Error| PvError::Download {
            asset: name.to_string(),
            source,
        };

        let resp = self
            .client
            .get(self.asset_url(name))
            .send()
            .await
            .map_err(download_err)?;

        if resp.status() != StatusCode::OK {
            return Err(PvError::DownloadStatus {
                asset: name.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(download_err)?;
        Ok(body.to_vec())
    }
}

impl Default for AssetFetcher {
    fn default() -> Self {
        Self::new()
    }
}
