//! Property-based tests: invariant verification with proptest.

mod common;

use common::{book, favorite_ids, favorites_sync, signed_in, ScriptedCatalog};
use proptest::prelude::*;

use novely_client::application::presentation::highlight;
use novely_client::application::search::{SearchEngine, SearchOutcome};
use novely_client::domain::model::book::Rating;
use novely_client::domain::model::id::BookId;

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(fut)
}

proptest! {
    /// 空白のみの検索語は通信せずに結果を消す。
    #[test]
    fn blank_terms_never_hit_the_backend(term in "[ \t\n]{0,8}") {
        let gateway = ScriptedCatalog::new();
        let engine = SearchEngine::new(gateway.clone());

        let outcome = block_on(engine.search(&term));

        prop_assert_eq!(outcome, SearchOutcome::Cleared);
        prop_assert!(gateway.calls().is_empty());
        prop_assert!(engine.snapshot().results().is_empty());
    }

    /// ハイライト区間を連結すると元のタイトルに戻る。
    #[test]
    fn highlight_spans_rebuild_title(
        title in "[a-zA-Z ]{0,30}",
        query in "[a-zA-Z]{0,4}",
    ) {
        let spans = highlight(&title, &query);
        let rebuilt: String = spans.iter().map(|s| s.text.as_str()).collect();
        prop_assert_eq!(rebuilt, title);
    }

    /// 一致区間はクエリと大文字小文字を無視して等しい。
    #[test]
    fn matched_spans_equal_query_ignoring_case(
        prefix in "[a-z ]{0,10}",
        query in "[a-zA-Z]{1,5}",
        suffix in "[a-z ]{0,10}",
    ) {
        let title = format!("{prefix}{}{suffix}", query.to_uppercase());
        let spans = highlight(&title, &query);

        prop_assert!(spans.iter().any(|s| s.matched));
        for span in spans.iter().filter(|s| s.matched) {
            prop_assert_eq!(span.text.to_lowercase(), query.to_lowercase());
        }
        for pair in spans.windows(2) {
            prop_assert!(pair[0].matched || pair[1].matched);
        }
    }

    /// 同じIDを2回トグルすると元の集合に戻る。
    #[test]
    fn double_toggle_round_trips(
        initial in proptest::collection::hash_set("[a-z0-9]{1,6}", 0..6),
        target in "[a-z0-9]{1,6}",
    ) {
        let ids: Vec<&str> = initial.iter().map(String::as_str).collect();
        let gateway = ScriptedCatalog::new();
        gateway.push_favorites(Ok(favorite_ids(&ids)));
        let (sync, _notices) = favorites_sync(&gateway, signed_in());
        let id = BookId::new(target).unwrap();

        let (before, after) = block_on(async {
            let before = sync.load().await;
            sync.toggle(&id).await.unwrap();
            sync.toggle(&id).await.unwrap();
            (before, sync.snapshot())
        });

        prop_assert_eq!(before, after);
    }

    /// 0..=5 だけが評価として有効。
    #[test]
    fn rating_accepts_only_zero_to_five(value in -20i64..20) {
        let rating = Rating::new(value);
        prop_assert_eq!(rating.is_ok(), (0..=5).contains(&value));
        if let Ok(r) = rating {
            prop_assert_eq!(i64::from(r.value()), value);
        }
    }

    /// 結果行の経路は常に `/books/<id>`。
    #[test]
    fn result_route_uses_book_id(id in "[a-f0-9]{24}") {
        let summary = book(&id, "Title", "Author");
        prop_assert_eq!(summary.id().route(), format!("/books/{id}"));
    }
}
