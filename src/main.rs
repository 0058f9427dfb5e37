use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Local};
use iced::widget::{column, container, text};
use iced::{Element, Length, Task, Theme};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod oauth;
mod router;
mod state;
mod ui;

use api::{HttpMappingSource, MappingSource};
use config::AppConfig;
use error::{AuthError, FetchError};
use oauth::{GoogleOAuth, OAuthClient};
use router::{Route, Router};
use state::auth::AuthStore;
use state::data::{MappingNode, Selection, UserProfile};
use state::files::FileRegistry;
use state::mappings::MappingStore;

/// Main application state
///
/// Owns every store; views receive borrows of the pieces they render.
struct App {
    config: AppConfig,
    /// File metadata reference table
    registry: FileRegistry,
    mappings: MappingStore,
    auth: AuthStore,
    router: Router,
    source: Arc<dyn MappingSource>,
    oauth: Arc<dyn OAuthClient>,
    /// Provider consent URL, built once
    authorize_url: String,
    /// Ids of tree nodes whose children are hidden
    collapsed: HashSet<String>,
    token_input: String,
    /// Token of the in-flight sign-in, promoted to `access_token` on success
    pending_token: Option<String>,
    access_token: Option<String>,
    login_error: Option<String>,
    last_refresh: Option<DateTime<Local>>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Switch to the view routed at this path
    Navigate(String),
    /// Re-fetch the mapping tree
    RefreshMappings,
    MappingsFetched(Result<Vec<MappingNode>, FetchError>),
    /// User picked a node in the tree
    Select(Selection),
    /// Expand or collapse a tree node
    ToggleNode(String),
    TokenChanged(String),
    SubmitLogin,
    ProfileLoaded(Result<UserProfile, AuthError>),
    Logout,
    LoggedOut(Result<(), AuthError>),
}

impl App {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = AppConfig::load().unwrap_or_else(|e| {
            warn!("Ignoring config: {}", e);
            AppConfig::default()
        });

        let registry = match &config.registry_file {
            Some(path) => FileRegistry::load(path).unwrap_or_else(|e| {
                warn!("Using built-in file records only: {}", e);
                FileRegistry::seeded()
            }),
            None => FileRegistry::seeded(),
        };

        let client = api::build_client();
        let source = HttpMappingSource::new(client.clone(), &config.api_url);
        info!("Mapping endpoint: {}", source.url());
        let oauth = GoogleOAuth::new(client, config.oauth.clone());

        let app = Self::with_parts(config, registry, Arc::new(source), Arc::new(oauth));
        let startup = app.fetch_task();
        (app, startup)
    }

    /// Assemble the application from explicit collaborators
    fn with_parts(
        config: AppConfig,
        registry: FileRegistry,
        source: Arc<dyn MappingSource>,
        oauth: Arc<dyn OAuthClient>,
    ) -> Self {
        info!("🗂️  Console initialized with {} file records", registry.record_count());
        let router = Router::new(&config.start_path);
        let authorize_url = oauth.begin_login();

        Self {
            config,
            registry,
            mappings: MappingStore::new(),
            auth: AuthStore::new(),
            router,
            source,
            oauth,
            authorize_url,
            collapsed: HashSet::new(),
            token_input: String::new(),
            pending_token: None,
            access_token: None,
            login_error: None,
            last_refresh: None,
            status: "Loading mappings...".to_string(),
        }
    }

    fn fetch_task(&self) -> Task<Message> {
        Task::perform(
            MappingStore::fetch_mappings(Arc::clone(&self.source)),
            Message::MappingsFetched,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(path) => {
                self.router.navigate(&path);
                Task::none()
            }
            Message::RefreshMappings => {
                self.status = "Refreshing mappings...".to_string();
                self.fetch_task()
            }
            Message::MappingsFetched(result) => {
                match self.mappings.apply_fetch(result) {
                    Ok(()) => {
                        let now = Local::now();
                        let tree = self.mappings.all_mappings();
                        self.collapsed.retain(|id| tree.find(id).is_some());
                        self.status = format!(
                            "Loaded {} mappings at {}",
                            tree.node_count() - 1,
                            now.format("%H:%M:%S")
                        );
                        self.last_refresh = Some(now);
                    }
                    Err(e) => {
                        self.status = format!("Could not load mappings: {}", e);
                    }
                }
                Task::none()
            }
            Message::Select(selection) => {
                self.mappings.update_selected(&self.registry, selection);
                Task::none()
            }
            Message::ToggleNode(id) => {
                if !self.collapsed.remove(&id) {
                    self.collapsed.insert(id);
                }
                Task::none()
            }
            Message::TokenChanged(value) => {
                self.token_input = value;
                Task::none()
            }
            Message::SubmitLogin => {
                if self.pending_token.is_some() {
                    return Task::none();
                }
                let token = self.token_input.trim().to_string();
                self.login_error = None;
                self.pending_token = Some(token.clone());

                let oauth = Arc::clone(&self.oauth);
                Task::perform(
                    async move { oauth.current_profile(&token).await },
                    Message::ProfileLoaded,
                )
            }
            Message::ProfileLoaded(result) => {
                let token = self.pending_token.take();
                match result {
                    Ok(profile) => {
                        self.auth.login(profile);
                        self.access_token = token;
                        self.token_input.clear();
                        self.status = format!("Signed in as {}", self.auth.user_info().display_name());
                        self.router.navigate("/");
                    }
                    Err(e) => {
                        warn!("Sign-in failed: {}", e);
                        self.login_error = Some(e.to_string());
                    }
                }
                Task::none()
            }
            Message::Logout => {
                self.auth.logout();
                self.status = "Signed out".to_string();
                match self.access_token.take() {
                    Some(token) => {
                        let oauth = Arc::clone(&self.oauth);
                        Task::perform(
                            async move { oauth.logout(&token).await },
                            Message::LoggedOut,
                        )
                    }
                    None => Task::none(),
                }
            }
            Message::LoggedOut(result) => {
                if let Err(e) = result {
                    warn!("Token revocation failed: {}", e);
                    self.status = format!("Signed out locally; provider said: {}", e);
                }
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let page = match self.router.current() {
            Route::About => ui::about::view(),
            Route::Main => ui::dashboard::view(&self.mappings, &self.collapsed),
            Route::Login => ui::login::view(ui::login::LoginView {
                auth: &self.auth,
                authorize_url: &self.authorize_url,
                token_input: &self.token_input,
                error: self.login_error.as_deref(),
                pending: self.pending_token.is_some(),
            }),
            Route::ServerLink => ui::server_link::view(ui::server_link::ServerLinkView {
                api_url: &self.config.api_url,
                mappings_url: api::mappings_url(&self.config.api_url),
                node_count: self.mappings.all_mappings().node_count() - 1,
                last_refresh: self
                    .last_refresh
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string()),
            }),
            Route::NotFound => ui::not_found(self.router.path()),
        };

        let content = column![
            ui::nav_bar(self.router.current(), &self.auth),
            container(page).height(Length::Fill),
            text(&self.status).size(14),
        ]
        .spacing(20)
        .padding(24);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn title(&self) -> String {
        format!("Index Server Console - {}", self.router.current().title())
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    iced::application(App::title, App::update, App::view)
        .theme(App::theme)
        .centered()
        .run_with(App::new)
}
