//! MCP Server for novely-client
//!
//! MCP Protocol (stdio) <-> application::{LiveSearch, SearchEngine, FavoritesSync, CategoryBrowser,
//! BookReader, AuthService}
//!
//! 12 tools: type_query, focus_search, search_panel, open_result, search_books,
//! favorites, toggle_favorite, browse_category, open_book, read_chapter, login, logout

use std::sync::Arc;
use std::time::Duration;

use rmcp::{
    handler::server::{tool::ToolCallContext, tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::application::auth::AuthService;
use crate::application::catalog::CategoryBrowser;
use crate::application::error::AppError;
use crate::application::favorites::FavoritesSync;
use crate::application::live_search::LiveSearch;
use crate::application::notify::{NoticeLevel, NoticeQueue, Notifier};
use crate::application::presentation::{ResultPresenter, ResultsView};
use crate::application::reader::BookReader;
use crate::application::search::{SearchEngine, SearchOutcome};
use crate::application::session::Session;
use crate::domain::model::auth::{BearerToken, Credentials};
use crate::domain::model::book::Genre;
use crate::domain::model::id::BookId;
use crate::domain::model::query::SearchQuery;
use crate::infra::http::HttpCatalog;
use crate::infra::settings::Settings;

/// `search_panel` の待機上限。
const MAX_PANEL_WAIT_MS: u64 = 5_000;

// =============================================================================
// Public entry point
// =============================================================================

/// MCP Serverを起動する。起動時にお気に入りを1回読み込む（画面マウント相当）。
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let server = NovelyMcpServer::new(&settings)?;
    server.favorites.load().await;
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

// =============================================================================
// MCP Server
// =============================================================================

#[derive(Clone)]
struct NovelyMcpServer {
    /// ナビバーの検索ボックス（入力しながら検索）。
    live: Arc<LiveSearch<HttpCatalog>>,
    /// 検索結果ページ。ドロップダウンとは別の状態を持つ。
    results_page: Arc<SearchEngine<HttpCatalog>>,
    favorites: Arc<FavoritesSync<HttpCatalog>>,
    browser: Arc<CategoryBrowser<HttpCatalog>>,
    reader: Arc<BookReader<HttpCatalog>>,
    auth: Arc<AuthService<HttpCatalog>>,
    notices: Arc<NoticeQueue>,
    search_limit: u32,
    tool_router: ToolRouter<Self>,
}

impl NovelyMcpServer {
    /// tokio ランタイム内で呼ぶこと（検索ボックスのDebouncerを起動する）。
    fn new(settings: &Settings) -> anyhow::Result<Self> {
        let gateway = Arc::new(HttpCatalog::new(
            &settings.api.base_url,
            settings.api.timeout(),
        )?);
        let session = Arc::new(Session::with_token(
            settings.api.token.clone().map(BearerToken::new),
        ));
        let notices = Arc::new(NoticeQueue::new());
        let notifier: Arc<dyn Notifier> = notices.clone();

        let live = LiveSearch::new(
            Arc::new(SearchEngine::new(gateway.clone())),
            settings.search.debounce(),
        );
        let results_page = SearchEngine::new(gateway.clone());
        results_page.focus();

        tracing::info!(
            base_url = %gateway.base_url(),
            debounce_ms = settings.search.debounce_ms,
            signed_in = session.is_authenticated(),
            "novely MCP server configured"
        );

        Ok(Self {
            live: Arc::new(live),
            results_page: Arc::new(results_page),
            favorites: Arc::new(FavoritesSync::new(
                gateway.clone(),
                session.clone(),
                notifier,
            )),
            browser: Arc::new(CategoryBrowser::new(
                gateway.clone(),
                settings.catalog.page_size,
            )),
            reader: Arc::new(BookReader::new(gateway.clone(), session.clone())),
            auth: Arc::new(AuthService::new(gateway, session)),
            notices,
            search_limit: settings.search.limit,
            tool_router: Self::tool_router(),
        })
    }

    fn to_mcp_error(e: AppError) -> McpError {
        match e {
            AppError::NotAuthenticated
            | AppError::ToggleInFlight(_)
            | AppError::LoginRejected(_)
            | AppError::NoChapters(_)
            | AppError::Domain(_) => McpError::invalid_params(format!("{e}"), None),
            AppError::Fetch(_) => McpError::internal_error(format!("{e}"), None),
        }
    }

    /// 溜まったトースト通知を本文の末尾に付ける。
    fn with_notices(&self, mut text: String) -> String {
        let notices = self.notices.drain();
        if !notices.is_empty() {
            text.push('\n');
            for notice in notices {
                let tag = match notice.level {
                    NoticeLevel::Info => "info",
                    NoticeLevel::Success => "success",
                    NoticeLevel::Error => "error",
                };
                text.push_str(&format!("\n> [{tag}] {}", notice.message));
            }
        }
        text
    }

    /// ドロップダウンの現在の描画。
    fn render_panel(&self) -> String {
        let state = self.live.snapshot();
        let view = ResultPresenter::build(
            &state.panel(),
            state.input(),
            &self.favorites.snapshot(),
        );
        match view {
            ResultsView::Hidden => "(search panel hidden)".to_string(),
            other => ResultPresenter::render_markdown(&other),
        }
    }
}

// =============================================================================
// ServerHandler impl
// =============================================================================

impl ServerHandler for NovelyMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "novely-client".to_string(),
                title: Some("Novely: Book Search & Favorites".to_string()),
                description: Some(
                    "Search the Novely catalog as you type, browse genres, and keep favorites in sync."
                        .to_string(),
                ),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Live search: `type_query` for each edit, then `search_panel` to read the dropdown. \
                 `open_result` picks a row.\n\
                 \n\
                 Full results page: `search_books` (optional category/limit). \
                 Genres: `browse_category`.\n\
                 \n\
                 Reading: `open_book` for details and chapters, `read_chapter` for the text.\n\
                 \n\
                 Favorites need a session: `login` first, then `favorites` / `toggle_favorite`."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_ctx = ToolCallContext::new(self, request, context);
        self.tool_router.call(tool_ctx).await
    }
}

// =============================================================================
// Request types
// =============================================================================

fn parse_book_id(s: &str) -> Result<BookId, McpError> {
    BookId::new(s.trim())
        .map_err(|_| McpError::invalid_params(format!("Invalid book_id: '{s}'"), None))
}

/// "All" と未指定はカテゴリ無し。
fn parse_category(s: Option<&str>) -> Result<Option<Genre>, McpError> {
    match s.map(str::trim) {
        None | Some("") => Ok(None),
        Some(all) if all.eq_ignore_ascii_case("all") => Ok(None),
        Some(other) => Genre::parse(other).map(Some).ok_or_else(|| {
            McpError::invalid_params(
                format!(
                    "Unknown category: '{other}'. Use one of: {}",
                    genre_list()
                ),
                None,
            )
        }),
    }
}

fn parse_genre(s: &str) -> Result<Genre, McpError> {
    Genre::parse(s).ok_or_else(|| {
        McpError::invalid_params(
            format!("Unknown genre: '{s}'. Use one of: {}", genre_list()),
            None,
        )
    })
}

fn genre_list() -> String {
    Genre::ALL
        .iter()
        .map(|g| g.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpTypeQueryRequest {
    #[schemars(
        description = "Full current text of the search box after the edit (not just the new character)"
    )]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpFocusRequest {
    #[schemars(description = "true when the search box gains focus, false when it loses it")]
    pub focused: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpSearchPanelRequest {
    #[schemars(
        description = "Milliseconds to wait before reading the panel, e.g. the debounce delay plus network time (default: 0, max: 5000)"
    )]
    pub wait_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpOpenResultRequest {
    #[schemars(description = "Book id (`_id`) of the clicked result row")]
    pub book_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpSearchBooksRequest {
    #[schemars(description = "Search keywords")]
    pub query: String,
    #[schemars(description = "Genre filter (e.g. 'Fantasy', 'Sci-Fi'). Omit or 'All' for every genre.")]
    pub category: Option<String>,
    #[schemars(description = "Maximum number of results (default from settings, usually 50)")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpFavoritesRequest {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpToggleFavoriteRequest {
    #[schemars(description = "Book id (`_id`) to add to or remove from favorites")]
    pub book_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpBrowseCategoryRequest {
    #[schemars(description = "Genre name (e.g. 'Mystery', 'Non-Fiction')")]
    pub genre: String,
    #[schemars(description = "1-based page number (default: 1)")]
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpOpenBookRequest {
    #[schemars(description = "Book id (`_id`), as in the `/books/<id>` route")]
    pub book_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpReadChapterRequest {
    #[schemars(description = "Book id (`_id`)")]
    pub book_id: String,
    #[schemars(
        description = "1-based chapter number (default: 1). Out-of-range numbers snap to the first or last chapter."
    )]
    pub chapter: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpLogoutRequest {}

// =============================================================================
// Tool implementations
// =============================================================================

#[tool_router]
impl NovelyMcpServer {
    #[tool(
        name = "type_query",
        description = "Type into the navbar search box. Pass the full box text after each edit. The search request fires once typing pauses; read the dropdown with `search_panel`.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = true
        )
    )]
    async fn type_query(
        &self,
        Parameters(req): Parameters<McpTypeQueryRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.live.focus();
        self.live.keystroke(req.text.clone());

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Query: \"{}\" (search runs after {} ms without edits)",
            req.text,
            self.live.debounce_delay().as_millis()
        ))]))
    }

    #[tool(
        name = "focus_search",
        description = "Focus or blur the navbar search box. The dropdown is visible while the box has focus or text.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn focus_search(
        &self,
        Parameters(req): Parameters<McpFocusRequest>,
    ) -> Result<CallToolResult, McpError> {
        if req.focused {
            self.live.focus();
        } else {
            self.live.blur();
        }
        Ok(CallToolResult::success(vec![Content::text(
            self.render_panel(),
        )]))
    }

    #[tool(
        name = "search_panel",
        description = "Read the navbar search dropdown: spinner, error, or result rows with matches in **bold** and ♥ for favorites.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn search_panel(
        &self,
        Parameters(req): Parameters<McpSearchPanelRequest>,
    ) -> Result<CallToolResult, McpError> {
        let wait = req.wait_ms.unwrap_or(0).min(MAX_PANEL_WAIT_MS);
        if wait > 0 {
            tokio::time::sleep(Duration::from_millis(wait)).await;
        }
        Ok(CallToolResult::success(vec![Content::text(
            self.with_notices(self.render_panel()),
        )]))
    }

    #[tool(
        name = "open_result",
        description = "Click a result row in the dropdown. Clears the search box, closes the dropdown and returns the detail route.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn open_result(
        &self,
        Parameters(req): Parameters<McpOpenResultRequest>,
    ) -> Result<CallToolResult, McpError> {
        let id = parse_book_id(&req.book_id)?;
        let route = self.live.select(&id);
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Navigate to {route}"
        ))]))
    }

    #[tool(
        name = "search_books",
        description = "Open the full search results page for a query, optionally filtered by genre. Reloads favorites like a fresh page.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    async fn search_books(
        &self,
        Parameters(req): Parameters<McpSearchBooksRequest>,
    ) -> Result<CallToolResult, McpError> {
        let category = parse_category(req.category.as_deref())?;
        let limit = req.limit.unwrap_or(self.search_limit).max(1);

        let favorites = self.favorites.load().await;
        self.results_page.set_input(&req.query);
        let outcome = self
            .results_page
            .run(
                SearchQuery::new(req.query.clone())
                    .with_category(category)
                    .with_limit(Some(limit)),
            )
            .await;

        let text = match outcome {
            SearchOutcome::Cleared => "No books found.\n".to_string(),
            _ => {
                let state = self.results_page.snapshot();
                let view = ResultPresenter::build(&state.panel(), state.input(), &favorites);
                ResultPresenter::render_markdown(&view)
            }
        };
        Ok(CallToolResult::success(vec![Content::text(
            self.with_notices(text),
        )]))
    }

    #[tool(
        name = "favorites",
        description = "Reload and list the signed-in user's favorite books.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    async fn favorites(
        &self,
        #[allow(unused_variables)] Parameters(_req): Parameters<McpFavoritesRequest>,
    ) -> Result<CallToolResult, McpError> {
        if !self.auth.session().is_authenticated() {
            return Err(Self::to_mcp_error(AppError::NotAuthenticated));
        }

        let set = self.favorites.load().await;
        let output = ResultPresenter::render_favorites(&self.favorites.books(), &set);

        Ok(CallToolResult::success(vec![Content::text(
            self.with_notices(output),
        )]))
    }

    #[tool(
        name = "toggle_favorite",
        description = "Add a book to favorites, or remove it if already there. Applied immediately and confirmed with the server; on failure the list is reloaded.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = true
        )
    )]
    async fn toggle_favorite(
        &self,
        Parameters(req): Parameters<McpToggleFavoriteRequest>,
    ) -> Result<CallToolResult, McpError> {
        let id = parse_book_id(&req.book_id)?;
        let text = match self.favorites.toggle(&id).await {
            Ok(true) => format!("♥ {id} is now a favorite"),
            Ok(false) => format!("♡ {id} is no longer a favorite"),
            Err(AppError::Fetch(e)) => format!(
                "Could not update {id}: {e}. Favorites reloaded ({} books).",
                self.favorites.snapshot().len()
            ),
            Err(other) => {
                self.notices.drain();
                return Err(Self::to_mcp_error(other));
            }
        };
        Ok(CallToolResult::success(vec![Content::text(
            self.with_notices(text),
        )]))
    }

    #[tool(
        name = "browse_category",
        description = "List books of one genre, 10 per page by default. Reloads favorites like a fresh page.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    async fn browse_category(
        &self,
        Parameters(req): Parameters<McpBrowseCategoryRequest>,
    ) -> Result<CallToolResult, McpError> {
        let genre = parse_genre(&req.genre)?;
        let favorites = self.favorites.load().await;
        let page = self.browser.page(genre, req.page.unwrap_or(1)).await;

        let mut output = ResultPresenter::render_category(genre, &page, &favorites);
        if page.has_next() {
            output.push_str(&format!("\nNext: page {}\n", page.page + 1));
        }
        Ok(CallToolResult::success(vec![Content::text(
            self.with_notices(output),
        )]))
    }

    #[tool(
        name = "open_book",
        description = "Open a book's detail page: author, genre, rating, description, favorite state and the chapter list.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    async fn open_book(
        &self,
        Parameters(req): Parameters<McpOpenBookRequest>,
    ) -> Result<CallToolResult, McpError> {
        let detail = self
            .reader
            .open(&req.book_id)
            .await
            .map_err(Self::to_mcp_error)?;
        let favorites = self.favorites.load().await;

        let output = ResultPresenter::render_book(&detail, favorites.contains(detail.id()));
        Ok(CallToolResult::success(vec![Content::text(
            self.with_notices(output),
        )]))
    }

    #[tool(
        name = "read_chapter",
        description = "Read one chapter of a book (HTML as stored by the author) with links to the previous and next chapters.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    async fn read_chapter(
        &self,
        Parameters(req): Parameters<McpReadChapterRequest>,
    ) -> Result<CallToolResult, McpError> {
        let chapter = self
            .reader
            .chapter(&req.book_id, req.chapter.unwrap_or(1))
            .await
            .map_err(Self::to_mcp_error)?;
        Ok(CallToolResult::success(vec![Content::text(
            ResultPresenter::render_chapter(&chapter),
        )]))
    }

    #[tool(
        name = "login",
        description = "Sign in with username and password. Favorites are loaded for the new session.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    async fn login(
        &self,
        Parameters(req): Parameters<McpLoginRequest>,
    ) -> Result<CallToolResult, McpError> {
        let username = req.username.clone();
        self.auth
            .login(Credentials {
                username: req.username,
                password: req.password,
            })
            .await
            .map_err(Self::to_mcp_error)?;

        let set = self.favorites.load().await;
        Ok(CallToolResult::success(vec![Content::text(
            self.with_notices(format!(
                "Signed in as {username}. {} favorites loaded.",
                set.len()
            )),
        )]))
    }

    #[tool(
        name = "logout",
        description = "Sign out and forget the session token.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn logout(
        &self,
        #[allow(unused_variables)] Parameters(_req): Parameters<McpLogoutRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.auth.logout();
        self.favorites.load().await;
        Ok(CallToolResult::success(vec![Content::text("Signed out.")]))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn server_info() {
        let server = NovelyMcpServer::new(&Settings::default()).unwrap();
        let info = server.get_info();
        assert_eq!(info.server_info.name, "novely-client");
        assert!(!info.server_info.version.is_empty());
    }

    #[tokio::test]
    async fn rejects_invalid_base_url() {
        let mut settings = Settings::default();
        settings.api.base_url = "not a url".to_string();
        assert!(NovelyMcpServer::new(&settings).is_err());
    }

    #[tokio::test]
    async fn panel_hidden_until_focused() {
        let server = NovelyMcpServer::new(&Settings::default()).unwrap();
        assert_eq!(server.render_panel(), "(search panel hidden)");

        server.live.focus();
        assert_eq!(server.render_panel(), "No results found\n");
    }

    #[tokio::test]
    async fn open_result_returns_route_and_hides_panel() {
        let server = NovelyMcpServer::new(&Settings::default()).unwrap();
        server.live.focus();
        server.live.keystroke("harry");

        let route = server.live.select(&parse_book_id("1").unwrap());
        assert_eq!(route, "/books/1");
        assert_eq!(server.live.snapshot().input(), "");
        assert_eq!(server.render_panel(), "(search panel hidden)");

        server.live.focus();
        assert_eq!(server.render_panel(), "No results found\n");
    }

    #[test]
    fn parse_category_handles_all_and_aliases() {
        assert_eq!(parse_category(None).unwrap(), None);
        assert_eq!(parse_category(Some("All")).unwrap(), None);
        assert_eq!(parse_category(Some(" ")).unwrap(), None);
        assert_eq!(
            parse_category(Some("Sci-Fi")).unwrap(),
            Some(Genre::ScienceFiction)
        );
        assert!(parse_category(Some("Cookbooks")).is_err());
    }

    #[test]
    fn parse_book_id_rejects_blank() {
        assert!(parse_book_id("").is_err());
        assert!(parse_book_id("  ").is_err());
        assert_eq!(parse_book_id(" 42 ").unwrap().as_str(), "42");
    }

    #[test]
    fn to_mcp_error_maps_user_errors_to_invalid_params() {
        let err = NovelyMcpServer::to_mcp_error(AppError::NotAuthenticated);
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);

        let err = NovelyMcpServer::to_mcp_error(AppError::NoChapters(
            parse_book_id("6").unwrap(),
        ));
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);

        let err = NovelyMcpServer::to_mcp_error(AppError::Fetch(
            crate::domain::error::FetchError::Server,
        ));
        assert_eq!(err.code, rmcp::model::ErrorCode::INTERNAL_ERROR);
    }

    #[test]
    fn type_query_request_parse() {
        let req: McpTypeQueryRequest = serde_json::from_str(r#"{"text": "harry"}"#).unwrap();
        assert_eq!(req.text, "harry");
    }

    #[test]
    fn search_books_request_minimal() {
        let req: McpSearchBooksRequest = serde_json::from_str(r#"{"query": "dune"}"#).unwrap();
        assert_eq!(req.query, "dune");
        assert!(req.category.is_none());
        assert!(req.limit.is_none());
    }

    #[test]
    fn browse_category_request_defaults() {
        let req: McpBrowseCategoryRequest =
            serde_json::from_str(r#"{"genre": "Mystery"}"#).unwrap();
        assert_eq!(req.genre, "Mystery");
        assert!(req.page.is_none());
    }

    #[test]
    fn read_chapter_request_defaults() {
        let req: McpReadChapterRequest = serde_json::from_str(r#"{"book_id": "5"}"#).unwrap();
        assert_eq!(req.book_id, "5");
        assert!(req.chapter.is_none());

        let req: McpReadChapterRequest =
            serde_json::from_str(r#"{"book_id": "5", "chapter": 3}"#).unwrap();
        assert_eq!(req.chapter, Some(3));
    }

    #[test]
    fn open_book_request_parse() {
        let req: McpOpenBookRequest = serde_json::from_str(r#"{"book_id": "abc"}"#).unwrap();
        assert_eq!(req.book_id, "abc");
    }

    #[test]
    fn empty_requests_parse() {
        let _req: McpFavoritesRequest = serde_json::from_str("{}").unwrap();
        let _req: McpLogoutRequest = serde_json::from_str("{}").unwrap();
    }

    #[test]
    fn genre_list_names_every_genre() {
        let list = genre_list();
        for genre in Genre::ALL {
            assert!(list.contains(genre.label()));
        }
    }
}
