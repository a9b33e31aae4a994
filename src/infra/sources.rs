//! `ItemSource` implementations over the ContentAPI, one per list view.

use async_trait::async_trait;

use crate::application::sources::{
    FetchPage, FetchQuery, FetchStrategy, ItemSource, SourceError,
};
use crate::domain::entities::{ArticleRecord, GalleryRecord, ReleaseRecord};
use crate::domain::types::ReleaseKind;

use super::api::{ApiError, ContentApi};

impl From<ApiError> for SourceError {
    fn from(err: ApiError) -> Self {
        SourceError::Fetch(err.to_string())
    }
}

/// Articles: the backend filters and pages via `GET /items?skip=&limit=`.
#[derive(Debug, Clone)]
pub struct ArticleSource {
    api: ContentApi,
}

impl ArticleSource {
    pub fn new(api: ContentApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ItemSource<ArticleRecord> for ArticleSource {
    fn strategy(&self) -> FetchStrategy {
        FetchStrategy::ServerPaged
    }

    async fn fetch(&self, query: FetchQuery) -> Result<FetchPage<ArticleRecord>, SourceError> {
        let page = self.api.list_articles(&query.params, query.window).await?;
        Ok(page)
    }
}

/// Releases: always fetched in bulk with a large limit; paging and date
/// filtering happen client-side.
#[derive(Debug, Clone)]
pub struct ReleaseSource {
    api: ContentApi,
    kind: ReleaseKind,
    fetch_limit: u32,
}

impl ReleaseSource {
    pub fn new(api: ContentApi, kind: ReleaseKind, fetch_limit: u32) -> Self {
        Self {
            api,
            kind,
            fetch_limit,
        }
    }
}

#[async_trait]
impl ItemSource<ReleaseRecord> for ReleaseSource {
    fn strategy(&self) -> FetchStrategy {
        FetchStrategy::FetchAll
    }

    async fn fetch(&self, query: FetchQuery) -> Result<FetchPage<ReleaseRecord>, SourceError> {
        let releases = self
            .api
            .list_releases(self.kind, self.fetch_limit, &query.params)
            .await?;
        Ok(FetchPage::complete(releases))
    }
}

/// Galleries: always fetched in full.
#[derive(Debug, Clone)]
pub struct GallerySource {
    api: ContentApi,
}

impl GallerySource {
    pub fn new(api: ContentApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ItemSource<GalleryRecord> for GallerySource {
    fn strategy(&self) -> FetchStrategy {
        FetchStrategy::FetchAll
    }

    async fn fetch(&self, query: FetchQuery) -> Result<FetchPage<GalleryRecord>, SourceError> {
        let galleries = self.api.list_galleries(&query.params).await?;
        Ok(FetchPage::complete(galleries))
    }
}
