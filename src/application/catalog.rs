use std::sync::Arc;

use crate::domain::model::book::{CategoryPage, Genre};
use crate::domain::repository::CatalogGateway;

/// ジャンル別のページ送り一覧。
pub struct CategoryBrowser<G> {
    gateway: Arc<G>,
    page_size: u32,
}

impl<G: CatalogGateway> CategoryBrowser<G> {
    pub fn new(gateway: Arc<G>, page_size: u32) -> Self {
        Self {
            gateway,
            page_size: page_size.max(1),
        }
    }

    /// 指定ページを取得する。1未満のページは1として扱う。
    /// 失敗時は空の1ページを返し、画面は「該当なし」として描画できる。
    pub async fn page(&self, genre: Genre, page: u32) -> CategoryPage {
        let page = page.max(1);
        match self
            .gateway
            .category_page(genre, page, self.page_size)
            .await
        {
            Ok(mut result) => {
                result.page = page;
                result.total_pages = result.total_pages.max(1);
                tracing::debug!(
                    genre = %genre,
                    page,
                    total_pages = result.total_pages,
                    count = result.books.len(),
                    "category page loaded"
                );
                result
            }
            Err(e) => {
                tracing::warn!(genre = %genre, page, error = %e, "failed to load category page");
                CategoryPage::empty(page)
            }
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}
