use super::book::BookSummary;
use super::id::BookId;

/// 詳細画面の書籍。要約に説明文と章数を足したもの。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetail {
    summary: BookSummary,
    description: Option<String>,
    chapter_count: u32,
}

impl BookDetail {
    pub fn new(summary: BookSummary, description: Option<String>, chapter_count: u32) -> Self {
        Self {
            summary,
            description,
            chapter_count,
        }
    }

    pub fn summary(&self) -> &BookSummary {
        &self.summary
    }

    pub fn id(&self) -> &BookId {
        self.summary.id()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn chapter_count(&self) -> u32 {
        self.chapter_count
    }

    /// 章番号を 1..=章数 に収める。章が無ければNone。
    pub fn clamp_chapter(&self, number: u32) -> Option<u32> {
        (self.chapter_count > 0).then(|| number.clamp(1, self.chapter_count))
    }
}

/// `GET /api/books/:id/chapter/:n` の本文部分。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterText {
    pub title: Option<String>,
    pub content: String,
}

/// 章本文。`content` はバックエンドが保存したHTMLそのまま。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub book_id: BookId,
    pub number: u32,
    pub total: u32,
    pub title: Option<String>,
    pub content: String,
}

impl Chapter {
    pub fn previous(&self) -> Option<u32> {
        (self.number > 1).then(|| self.number - 1)
    }

    pub fn next(&self) -> Option<u32> {
        (self.number < self.total).then(|| self.number + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(chapters: u32) -> BookDetail {
        BookDetail::new(
            BookSummary::new(BookId::new("7").unwrap(), "Emma", "Jane Austen"),
            None,
            chapters,
        )
    }

    #[test]
    fn clamp_chapter_stays_in_range() {
        assert_eq!(detail(3).clamp_chapter(0), Some(1));
        assert_eq!(detail(3).clamp_chapter(2), Some(2));
        assert_eq!(detail(3).clamp_chapter(9), Some(3));
        assert_eq!(detail(0).clamp_chapter(1), None);
    }

    #[test]
    fn navigation_at_edges() {
        let chapter = Chapter {
            book_id: BookId::new("7").unwrap(),
            number: 1,
            total: 2,
            title: None,
            content: String::new(),
        };
        assert_eq!(chapter.previous(), None);
        assert_eq!(chapter.next(), Some(2));

        let last = Chapter { number: 2, ..chapter };
        assert_eq!(last.previous(), Some(1));
        assert_eq!(last.next(), None);
    }
}
