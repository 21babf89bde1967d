use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::Url;

use crate::models::{CreatePostInput, PostView, UpdatePostInput};

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base = sanitize_base_url(base_url.into())?;
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            base_url: base,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) -> Result<()> {
        self.base_url = sanitize_base_url(base_url.into())?;
        Ok(())
    }

    pub fn list_posts(&self) -> Result<Vec<PostView>> {
        let url = self.url("/posts")?;
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.json()?)
    }

    pub fn get_post(&self, post_id: &str) -> Result<PostView> {
        let url = self.url(&format!("/posts/{post_id}"))?;
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.json()?)
    }

    pub fn create_post(&self, input: &CreatePostInput) -> Result<PostView> {
        let url = self.url("/posts")?;
        let response = self
            .client
            .post(url)
            .json(input)
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    pub fn update_post(&self, post_id: &str, input: &UpdatePostInput) -> Result<PostView> {
        let url = self.url(&format!("/posts/{post_id}"))?;
        let response = self
            .client
            .put(url)
            .json(input)
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    pub fn delete_post(&self, post_id: &str) -> Result<()> {
        let url = self.url(&format!("/posts/{post_id}"))?;
        self.client.delete(url).send()?.error_for_status()?;
        Ok(())
    }

    fn url(&self, path: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).context("invalid base URL")?;
        url.set_path(path.trim_start_matches('/'));
        Ok(url)
    }
}

fn sanitize_base_url(mut base: String) -> Result<String> {
    if !base.starts_with("http://") && !base.starts_with("https://") {
        base = format!("http://{base}");
    }
    // Remove trailing slash for consistency
    while base.ends_with('/') {
        base.pop();
    }
    // Validate once
    let _ = Url::parse(&base).context("invalid base URL")?;
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sanitize_prepends_scheme_and_strips_trailing_slashes() {
        assert_eq!(
            sanitize_base_url("localhost:3000/".into()).unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            sanitize_base_url("http://127.0.0.1:3000".into()).unwrap(),
            "http://127.0.0.1:3000"
        );
        assert_eq!(
            sanitize_base_url("https://example.com//".into()).unwrap(),
            "https://example.com"
        );
    }
}
