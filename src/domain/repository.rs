use std::future::Future;

use super::error::FetchError;
use super::model::auth::{BearerToken, Credentials, LoginOutcome};
use super::model::book::{BookSummary, CategoryPage, Genre};
use super::model::favorites::FavoriteList;
use super::model::id::BookId;
use super::model::query::SearchQuery;
use super::model::reading::{BookDetail, ChapterText};

/// バックエンドREST APIの抽象。Infra層が実装する。
///
/// 実装はレスポンスを型付きの値へ変換し、失敗は [`FetchError`] に分類して返す。
pub trait CatalogGateway: Send + Sync {
    /// `GET /api/books/search`: 関連度順の検索結果。
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<BookSummary>, FetchError>> + Send;

    /// `GET /api/favorites`: 認証ユーザーのお気に入り。401は [`FetchError::Unauthenticated`]。
    fn favorites(
        &self,
        token: &BearerToken,
    ) -> impl Future<Output = Result<FavoriteList, FetchError>> + Send;

    /// `POST /api/books/:id/favorite`: お気に入りの所属を反転する。401は [`FetchError::Unauthenticated`]。
    fn toggle_favorite(
        &self,
        token: &BearerToken,
        id: &BookId,
    ) -> impl Future<Output = Result<(), FetchError>> + Send;

    /// `GET /api/books/category`: ジャンル別のページ。
    fn category_page(
        &self,
        genre: Genre,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<CategoryPage, FetchError>> + Send;

    /// `POST /api/auth/login`: 認証情報の拒否はエラーではなく [`LoginOutcome::Rejected`]。
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<LoginOutcome, FetchError>> + Send;

    /// `GET /api/books/:id`: 詳細と章数。トークンがあれば付ける。
    fn book(
        &self,
        token: Option<&BearerToken>,
        id: &BookId,
    ) -> impl Future<Output = Result<BookDetail, FetchError>> + Send;

    /// `GET /api/books/:id/chapter/:n`: 章本文。`number` は1始まり。
    fn chapter(
        &self,
        token: Option<&BearerToken>,
        id: &BookId,
        number: u32,
    ) -> impl Future<Output = Result<ChapterText, FetchError>> + Send;
}
