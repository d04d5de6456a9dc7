use std::collections::HashSet;

use super::book::BookSummary;
use super::id::BookId;

/// ログインユーザーのお気に入り書籍IDの集合。順序は持たない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesSet {
    ids: HashSet<BookId>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &BookId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// 所属を反転し、反転後に含まれていればtrueを返す。
    pub fn flip(&mut self, id: &BookId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    /// ソート済みのID一覧（表示用）。
    pub fn sorted(&self) -> Vec<&BookId> {
        let mut ids: Vec<&BookId> = self.ids.iter().collect();
        ids.sort();
        ids
    }
}

impl FromIterator<BookId> for FavoritesSet {
    fn from_iter<I: IntoIterator<Item = BookId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// `GET /api/favorites` の結果。書籍データが付いていればそれも保持する。
///
/// `ids` は常に `books` の全IDを含む。ID文字列だけで返された要素は `ids` にだけ入る。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteList {
    books: Vec<BookSummary>,
    ids: FavoritesSet,
}

impl FavoriteList {
    pub fn new(books: Vec<BookSummary>, bare_ids: impl IntoIterator<Item = BookId>) -> Self {
        let mut seen = HashSet::new();
        let books: Vec<BookSummary> = books
            .into_iter()
            .filter(|b| seen.insert(b.id().clone()))
            .collect();
        let ids = bare_ids
            .into_iter()
            .chain(books.iter().map(|b| b.id().clone()))
            .collect();
        Self { books, ids }
    }

    pub fn books(&self) -> &[BookSummary] {
        &self.books
    }

    pub fn ids(&self) -> &FavoritesSet {
        &self.ids
    }

    pub fn into_parts(self) -> (Vec<BookSummary>, FavoritesSet) {
        (self.books, self.ids)
    }
}

impl From<FavoritesSet> for FavoriteList {
    fn from(ids: FavoritesSet) -> Self {
        Self {
            books: Vec::new(),
            ids,
        }
    }
}
