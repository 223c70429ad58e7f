//! # ps-source-http
//!
//! `PostSource` backed by a JSONPlaceholder-style REST API
//! (`GET {base}/posts`, `GET {base}/posts/{id}`).

use async_trait::async_trait;
use log::{debug, info};
use ps_core::error::{AppError, Result};
use ps_core::models::Post;
use ps_core::traits::PostSource;
use reqwest::{Client, StatusCode, Url};

pub struct HttpPostSource {
    client: Client,
    base_url: Url,
}

impl HttpPostSource {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    /// Uses a caller-supplied client, e.g. one with custom timeouts or proxies.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        // Without a trailing slash `Url::join` would replace the last path segment.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&normalized)
            .map_err(|e| AppError::Config(format!("invalid upstream url {base_url}: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::Config(format!("invalid upstream path {path}: {e}")))
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    AppError::Transport(err.to_string())
}

#[async_trait]
impl PostSource for HttpPostSource {
    async fn fetch_all(&self) -> Result<Vec<Post>> {
        let url = self.endpoint("posts")?;
        debug!("GET {}", url);

        let posts: Vec<Post> = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(transport_error)?
            .json()
            .await
            .map_err(transport_error)?;

        info!("Upstream returned {} posts", posts.len());
        Ok(posts)
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Post> {
        let url = self.endpoint(&format!("posts/{id}"))?;
        debug!("GET {}", url);

        let resp = self.client.get(url).send().await.map_err(transport_error)?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(AppError::not_found("Post", id));
        }

        resp.error_for_status()
            .map_err(transport_error)?
            .json()
            .await
            .map_err(transport_error)
    }
}
