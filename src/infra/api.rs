//! HTTP client for the backend ContentAPI.
//!
//! The backend predates this console and its list endpoints answer in two
//! generations of shapes: articles as `{items, total}` or a legacy bare
//! array, releases as a bare array or wrapped in `{releases: [...]}`. Both
//! are accepted everywhere. A response that matches neither shape is treated
//! as zero results and logged, never propagated as an error: a malformed
//! body must degrade to an empty list, not crash the console.

use reqwest::{Client, Method, Response, StatusCode, Url};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;

use crate::application::sources::{FetchPage, PageWindow};
use crate::config::BackendSettings;
use crate::domain::entities::{ArticleRecord, GalleryRecord, ReleaseRecord};
use crate::domain::types::{ArticleStatus, ReleaseKind};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server error: status {status} body {body}")]
    Server { status: StatusCode, body: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Clone)]
pub struct ContentApi {
    client: Client,
    base: Url,
    token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewArticle {
    pub title: String,
    pub body: String,
    pub category: Option<String>,
    pub language: Option<String>,
    pub status: ArticleStatus,
    #[serde(with = "time::serde::rfc3339::option")]
    pub scheduled_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleUpdate {
    pub title: String,
    pub body: String,
    pub category: Option<String>,
    pub language: Option<String>,
    pub status: ArticleStatus,
    #[serde(with = "time::serde::rfc3339::option")]
    pub scheduled_at: Option<OffsetDateTime>,
}

/// One image queued for a gallery upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Outcome of a sequential gallery upload run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadReport {
    pub uploaded: u32,
    pub failed: u32,
}

impl ContentApi {
    pub fn new(settings: &BackendSettings) -> Result<Self, ApiError> {
        // A trailing slash makes relative joins append to the configured
        // path prefix instead of replacing its last segment.
        let mut base = Url::parse(&settings.base_url)?;
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base,
            token: settings.api_token.clone(),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("marquee/", env!("CARGO_PKG_VERSION"))
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base.join(path).map_err(ApiError::Url)
    }

    fn auth_header(&self) -> Result<Option<HeaderValue>, ApiError> {
        self.token
            .as_ref()
            .map(|token| {
                HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|err| ApiError::InvalidInput(err.to_string()))
            })
            .transpose()
    }

    async fn get_value(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, ApiError> {
        let mut url = self.url(path)?;
        if !query.is_empty() {
            url.set_query(None);
            let mut qp = url.query_pairs_mut();
            for (key, value) in query {
                qp.append_pair(key, value);
            }
        }

        let mut req = self.client.request(Method::GET, url);
        if let Some(header) = self.auth_header()? {
            req = req.header(AUTHORIZATION, header);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            return Err(ApiError::Server { status, body });
        }
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(path, error = %err, "response body is not JSON; treating as empty");
                Ok(Value::Null)
            }
        }
    }

    async fn send_unit(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<(), ApiError> {
        let url = self.url(path)?;
        let mut req = self.client.request(method, url);
        if let Some(header) = self.auth_header()? {
            req = req.header(AUTHORIZATION, header);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }

        let resp = req.send().await?;
        Self::ensure_success(resp).await
    }

    async fn ensure_success(resp: Response) -> Result<(), ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server { status, body });
        }
        Ok(())
    }

    /// `GET /items` — the only list endpoint with true server-side paging.
    pub async fn list_articles(
        &self,
        params: &[(&str, String)],
        window: Option<PageWindow>,
    ) -> Result<FetchPage<ArticleRecord>, ApiError> {
        let mut query: Vec<(&str, String)> = params.to_vec();
        if let Some(window) = window {
            query.push(("skip", window.skip.to_string()));
            query.push(("limit", window.limit.to_string()));
        }
        let value = self.get_value("items", &query).await?;
        Ok(decode_paged(value, "items"))
    }

    /// `GET /releases/{theater|ott}` — always fetched with a large limit;
    /// paging and date filtering happen client-side.
    pub async fn list_releases(
        &self,
        kind: ReleaseKind,
        limit: u32,
        params: &[(&str, String)],
    ) -> Result<Vec<ReleaseRecord>, ApiError> {
        let mut query: Vec<(&str, String)> = params.to_vec();
        query.push(("limit", limit.to_string()));
        let path = format!("releases/{}", kind.as_str());
        let value = self.get_value(&path, &query).await?;
        Ok(decode_listing(value, "releases"))
    }

    /// `GET /galleries` — always fetched in full.
    pub async fn list_galleries(
        &self,
        params: &[(&str, String)],
    ) -> Result<Vec<GalleryRecord>, ApiError> {
        let value = self.get_value("galleries", params).await?;
        Ok(decode_listing(value, "galleries"))
    }

    // Mutations are fire-and-refresh: on success the owning controller's
    // `refetch()` resynchronizes the list.

    pub async fn create_article(&self, article: &NewArticle) -> Result<(), ApiError> {
        let body = serde_json::to_value(article)
            .map_err(|err| ApiError::InvalidInput(err.to_string()))?;
        self.send_unit(Method::POST, "items", Some(body)).await
    }

    pub async fn update_article(&self, id: &str, update: &ArticleUpdate) -> Result<(), ApiError> {
        let body = serde_json::to_value(update)
            .map_err(|err| ApiError::InvalidInput(err.to_string()))?;
        self.send_unit(Method::PUT, &format!("items/{id}"), Some(body))
            .await
    }

    pub async fn delete_article(&self, id: &str) -> Result<(), ApiError> {
        self.send_unit(Method::DELETE, &format!("items/{id}"), None)
            .await
    }

    pub async fn delete_release(&self, kind: ReleaseKind, id: &str) -> Result<(), ApiError> {
        self.send_unit(
            Method::DELETE,
            &format!("releases/{}/{id}", kind.as_str()),
            None,
        )
        .await
    }

    pub async fn delete_gallery(&self, id: &str) -> Result<(), ApiError> {
        self.send_unit(Method::DELETE, &format!("galleries/{id}"), None)
            .await
    }

    /// Upload gallery images one request per file, counting outcomes. A
    /// failed file is logged and skipped; the rest of the batch continues.
    pub async fn upload_gallery_images(
        &self,
        gallery_id: &str,
        images: Vec<ImageUpload>,
    ) -> Result<UploadReport, ApiError> {
        let path = format!("galleries/{gallery_id}/images");
        let url = self.url(&path)?;
        let mut report = UploadReport::default();

        for image in images {
            let file_name = image.file_name.clone();
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.content_type)
                .map_err(|err| ApiError::InvalidInput(err.to_string()))?;
            let form = Form::new().part("file", part);

            let mut req = self.client.request(Method::POST, url.clone());
            if let Some(header) = self.auth_header()? {
                req = req.header(AUTHORIZATION, header);
            }

            let outcome = match req.multipart(form).send().await {
                Ok(resp) => Self::ensure_success(resp).await,
                Err(err) => Err(ApiError::Http(err)),
            };
            match outcome {
                Ok(()) => report.uploaded += 1,
                Err(err) => {
                    report.failed += 1;
                    tracing::warn!(gallery_id, file_name, error = %err, "image upload failed");
                }
            }
        }

        Ok(report)
    }
}

/// Decode a server-paged listing: `{items, total}`, a legacy bare array
/// (total = length), or anything else as zero results.
pub(crate) fn decode_paged<T>(value: Value, field: &str) -> FetchPage<T>
where
    T: for<'de> Deserialize<'de>,
{
    match value {
        Value::Array(entries) => decode_entries(entries)
            .map(FetchPage::complete)
            .unwrap_or_else(FetchPage::empty),
        Value::Object(mut map) => {
            let total = map.get("total").and_then(Value::as_u64);
            match map.remove(field) {
                Some(Value::Array(entries)) => match decode_entries(entries) {
                    Some(items) => {
                        let total = total.map_or(items.len(), |t| t as usize);
                        FetchPage { items, total }
                    }
                    None => FetchPage::empty(),
                },
                _ => {
                    tracing::warn!(field, "paged response missing expected array; treating as empty");
                    FetchPage::empty()
                }
            }
        }
        _ => {
            tracing::warn!(field, "unexpected paged response shape; treating as empty");
            FetchPage::empty()
        }
    }
}

/// Decode an unpaged listing: a bare array or `{<wrapper>: [...]}`.
pub(crate) fn decode_listing<T>(value: Value, wrapper: &str) -> Vec<T>
where
    T: for<'de> Deserialize<'de>,
{
    match value {
        Value::Array(entries) => decode_entries(entries).unwrap_or_default(),
        Value::Object(mut map) => match map.remove(wrapper) {
            Some(Value::Array(entries)) => decode_entries(entries).unwrap_or_default(),
            _ => {
                tracing::warn!(wrapper, "listing missing expected array; treating as empty");
                Vec::new()
            }
        },
        _ => {
            tracing::warn!(wrapper, "unexpected listing shape; treating as empty");
            Vec::new()
        }
    }
}

fn decode_entries<T>(entries: Vec<Value>) -> Option<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
{
    match serde_json::from_value(Value::Array(entries)) {
        Ok(items) => Some(items),
        Err(err) => {
            tracing::warn!(error = %err, "failed to decode listing entries; treating as empty");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn article_json(id: &str) -> Value {
        json!({
            "id": id,
            "title": "Box office weekend",
            "status": "published",
            "published_at": "2024-03-10T08:00:00Z",
            "created_at": "2024-03-09T17:30:00Z"
        })
    }

    #[test]
    fn paged_response_with_items_and_total() {
        let value = json!({ "items": [article_json("a1"), article_json("a2")], "total": 37 });
        let page: FetchPage<ArticleRecord> = decode_paged(value, "items");
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 37);
    }

    #[test]
    fn legacy_bare_array_counts_itself() {
        let value = json!([article_json("a1"), article_json("a2"), article_json("a3")]);
        let page: FetchPage<ArticleRecord> = decode_paged(value, "items");
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 3);
    }

    #[test]
    fn paged_response_without_total_falls_back_to_length() {
        let value = json!({ "items": [article_json("a1")] });
        let page: FetchPage<ArticleRecord> = decode_paged(value, "items");
        assert_eq!(page.total, 1);
    }

    #[test]
    fn malformed_paged_response_is_empty() {
        for value in [json!({"unexpected": true}), json!("nonsense"), Value::Null] {
            let page: FetchPage<ArticleRecord> = decode_paged(value, "items");
            assert!(page.items.is_empty());
            assert_eq!(page.total, 0);
        }
    }

    #[test]
    fn undecodable_entries_degrade_to_empty() {
        let value = json!({ "items": [{"id": 42, "nope": true}], "total": 1 });
        let page: FetchPage<ArticleRecord> = decode_paged(value, "items");
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn wrapped_and_bare_release_listings_are_equivalent() {
        let release = json!({
            "id": "r1",
            "title": "Opening Friday",
            "kind": "theater",
            "release_date": "2024-03-22T00:00:00Z",
            "created_at": "2024-03-01T10:00:00Z"
        });
        let bare: Vec<ReleaseRecord> = decode_listing(json!([release.clone()]), "releases");
        let wrapped: Vec<ReleaseRecord> =
            decode_listing(json!({ "releases": [release] }), "releases");
        assert_eq!(bare, wrapped);
        assert_eq!(bare.len(), 1);
    }

    #[test]
    fn malformed_listing_is_empty() {
        let releases: Vec<ReleaseRecord> = decode_listing(json!({"count": 3}), "releases");
        assert!(releases.is_empty());
    }

    #[test]
    fn base_url_path_prefix_is_preserved() {
        let settings = BackendSettings {
            base_url: "https://cms.example.com/api".into(),
            api_token: None,
            request_timeout: std::time::Duration::from_secs(5),
            release_fetch_limit: 500,
        };
        let api = ContentApi::new(&settings).expect("client");
        assert_eq!(
            api.url("items").expect("url").as_str(),
            "https://cms.example.com/api/items"
        );

        let with_slash = BackendSettings {
            base_url: "https://cms.example.com/api/".into(),
            ..settings
        };
        let api = ContentApi::new(&with_slash).expect("client");
        assert_eq!(
            api.url("releases/theater").expect("url").as_str(),
            "https://cms.example.com/api/releases/theater"
        );
    }

    #[test]
    fn root_base_url_still_joins_cleanly() {
        let settings = BackendSettings {
            base_url: "https://cms.example.com".into(),
            api_token: None,
            request_timeout: std::time::Duration::from_secs(5),
            release_fetch_limit: 500,
        };
        let api = ContentApi::new(&settings).expect("client");
        assert_eq!(
            api.url("galleries").expect("url").as_str(),
            "https://cms.example.com/galleries"
        );
    }

    #[test]
    fn unrecognized_language_values_pass_through() {
        let mut entry = article_json("a1");
        entry["language"] = json!("bho");
        let value = json!({ "items": [entry], "total": 1 });
        let page: FetchPage<ArticleRecord> = decode_paged(value, "items");
        assert_eq!(page.items[0].language.as_deref(), Some("bho"));
    }
}
