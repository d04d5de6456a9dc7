use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde::Serialize;

use super::wire;
use crate::domain::error::FetchError;
use crate::domain::model::auth::{BearerToken, Credentials, LoginOutcome};
use crate::domain::model::book::{BookSummary, CategoryPage, Genre};
use crate::domain::model::favorites::FavoriteList;
use crate::domain::model::id::BookId;
use crate::domain::model::query::SearchQuery;
use crate::domain::model::reading::{BookDetail, ChapterText};
use crate::domain::repository::CatalogGateway;

#[derive(Debug, thiserror::Error)]
pub enum HttpSetupError {
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// reqwest によるCatalogGateway実装。
/// ステータスの分類とボディのデコードはここで行い、上位には型付きの値だけを返す。
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCatalog {
    /// `timeout` がNoneならreqwestの既定に任せる。
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, HttpSetupError> {
        let parsed = Url::parse(base_url).map_err(|e| HttpSetupError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(HttpSetupError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// ベースURLにパスセグメントを足す。各セグメントはパーセントエンコードされる。
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Network("API base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// ステータスを分類してからボディを返す。
    async fn read_body(response: reqwest::Response) -> Result<String, FetchError> {
        Self::read_body_with(response, classify_status).await
    }

    /// トークン必須のエンドポイント用。401をセッション切れとして扱う。
    async fn read_authed_body(response: reqwest::Response) -> Result<String, FetchError> {
        Self::read_body_with(response, classify_authed_status).await
    }

    async fn read_body_with(
        response: reqwest::Response,
        classify: fn(StatusCode) -> Result<(), FetchError>,
    ) -> Result<String, FetchError> {
        let status = response.status();
        let body = response.text().await.map_err(network_error)?;
        if let Err(e) = classify(status) {
            tracing::debug!(status = status.as_u16(), body = %body, "backend returned an error");
            return Err(e);
        }
        Ok(body)
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &T,
    ) -> Result<reqwest::Response, FetchError> {
        self.client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(network_error)
    }
}

/// 500はサーバーエラー、それ以外の非2xxは汎用HTTPエラー。
pub fn classify_status(status: StatusCode) -> Result<(), FetchError> {
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        Err(FetchError::Server)
    } else if !status.is_success() {
        Err(FetchError::Http {
            status: status.as_u16(),
        })
    } else {
        Ok(())
    }
}

/// 401は未認証、それ以外は [`classify_status`] と同じ。
pub fn classify_authed_status(status: StatusCode) -> Result<(), FetchError> {
    if status == StatusCode::UNAUTHORIZED {
        Err(FetchError::Unauthenticated)
    } else {
        classify_status(status)
    }
}

fn network_error(e: reqwest::Error) -> FetchError {
    FetchError::Network(e.to_string())
}

impl CatalogGateway for HttpCatalog {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<BookSummary>, FetchError> {
        let mut url = self.endpoint(&["api", "books", "search"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query.term());
            if let Some(category) = query.category() {
                pairs.append_pair("category", category.label());
            }
            if let Some(limit) = query.limit() {
                pairs.append_pair("limit", &limit.to_string());
            }
        }
        tracing::debug!(url = %url, "GET search");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(network_error)?;
        let body = Self::read_body(response).await?;
        wire::decode_book_list(&body)
    }

    async fn favorites(&self, token: &BearerToken) -> Result<FavoriteList, FetchError> {
        let url = self.endpoint(&["api", "favorites"])?;
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(network_error)?;
        let body = Self::read_authed_body(response).await?;
        wire::decode_favorites(&body)
    }

    async fn toggle_favorite(&self, token: &BearerToken, id: &BookId) -> Result<(), FetchError> {
        let url = self.endpoint(&["api", "books", id.as_str(), "favorite"])?;
        tracing::debug!(url = %url, "POST favorite toggle");
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(network_error)?;
        Self::read_authed_body(response).await?;
        Ok(())
    }

    async fn category_page(
        &self,
        genre: Genre,
        page: u32,
        limit: u32,
    ) -> Result<CategoryPage, FetchError> {
        let mut url = self.endpoint(&["api", "books", "category"])?;
        url.query_pairs_mut()
            .append_pair("category", genre.label())
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(network_error)?;
        let body = Self::read_body(response).await?;
        wire::decode_category_page(&body, page)
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, FetchError> {
        #[derive(Serialize)]
        struct LoginBody<'a> {
            username: &'a str,
            password: &'a str,
        }

        let url = self.endpoint(&["api", "auth", "login"])?;
        let response = self
            .post_json(
                url,
                &LoginBody {
                    username: &credentials.username,
                    password: &credentials.password,
                },
            )
            .await?;

        let status = response.status();
        if status.is_success() {
            let body = response.text().await.map_err(network_error)?;
            return wire::decode_login_token(&body).map(LoginOutcome::Accepted);
        }
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            return Err(FetchError::Server);
        }

        let body = response.text().await.map_err(network_error)?;
        let message =
            wire::decode_message(&body).unwrap_or_else(|| "Invalid credentials".to_string());
        Ok(LoginOutcome::Rejected(message))
    }

    async fn book(
        &self,
        token: Option<&BearerToken>,
        id: &BookId,
    ) -> Result<BookDetail, FetchError> {
        let url = self.endpoint(&["api", "books", id.as_str()])?;
        let mut request = self.client.get(url).header(ACCEPT, "application/json");
        if let Some(token) = token {
            request = request.bearer_auth(token.as_str());
        }
        let response = request.send().await.map_err(network_error)?;
        let body = Self::read_body(response).await?;
        wire::decode_book_detail(&body)
    }

    async fn chapter(
        &self,
        token: Option<&BearerToken>,
        id: &BookId,
        number: u32,
    ) -> Result<ChapterText, FetchError> {
        let number = number.to_string();
        let url = self.endpoint(&["api", "books", id.as_str(), "chapter", &number])?;
        tracing::debug!(url = %url, "GET chapter");
        let mut request = self.client.get(url).header(ACCEPT, "application/json");
        if let Some(token) = token {
            request = request.bearer_auth(token.as_str());
        }
        let response = request.send().await.map_err(network_error)?;
        let body = Self::read_body(response).await?;
        wire::decode_chapter(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_500_as_server_error() {
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            Err(FetchError::Server)
        );
    }

    #[test]
    fn classify_other_non_success_as_http_error() {
        assert_eq!(
            classify_status(StatusCode::NOT_FOUND),
            Err(FetchError::Http { status: 404 })
        );
        assert_eq!(
            classify_status(StatusCode::BAD_GATEWAY),
            Err(FetchError::Http { status: 502 })
        );
        assert_eq!(classify_status(StatusCode::OK), Ok(()));
        assert_eq!(classify_status(StatusCode::NO_CONTENT), Ok(()));
    }

    #[test]
    fn classify_401_as_unauthenticated_only_for_authed_endpoints() {
        assert_eq!(
            classify_authed_status(StatusCode::UNAUTHORIZED),
            Err(FetchError::Unauthenticated)
        );
        assert_eq!(
            classify_authed_status(StatusCode::INTERNAL_SERVER_ERROR),
            Err(FetchError::Server)
        );
        assert_eq!(
            classify_status(StatusCode::UNAUTHORIZED),
            Err(FetchError::Http { status: 401 })
        );
    }

    #[test]
    fn rejects_bad_base_url() {
        assert!(matches!(
            HttpCatalog::new("not a url", None),
            Err(HttpSetupError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            HttpCatalog::new("mailto:someone@example.com", None),
            Err(HttpSetupError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn endpoint_keeps_base_path_and_encodes_segments() {
        let catalog = HttpCatalog::new("http://localhost:5000/novely/", None).unwrap();
        let url = catalog.endpoint(&["api", "books", "a b/c", "favorite"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/novely/api/books/a%20b%2Fc/favorite"
        );
    }
}
