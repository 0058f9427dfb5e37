/// Static navigation table
///
/// Four paths map to four views. Anything else lands on `Route::NotFound`.

use tracing::debug;

/// The views the application can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    About,
    Main,
    Login,
    ServerLink,
    /// Fallback for paths outside the table
    NotFound,
}

/// Path to view table. Lookup is by exact match.
pub const ROUTES: [(&str, Route); 4] = [
    ("/", Route::Main),
    ("/about", Route::About),
    ("/login", Route::Login),
    ("/orgLink", Route::ServerLink),
];

impl Route {
    /// Canonical path of a routed view; `None` for the fallback.
    pub fn path(self) -> Option<&'static str> {
        ROUTES
            .iter()
            .find(|(_, route)| *route == self)
            .map(|(path, _)| *path)
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::About => "About",
            Route::Main => "Mappings",
            Route::Login => "Login",
            Route::ServerLink => "Server link",
            Route::NotFound => "Not found",
        }
    }
}

/// Resolve `path` against [`ROUTES`].
///
/// A single trailing slash is ignored (`/login/` is `/login`).
pub fn resolve(path: &str) -> Route {
    let path = match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    };
    ROUTES
        .iter()
        .find(|(p, _)| *p == path)
        .map(|(_, route)| *route)
        .unwrap_or(Route::NotFound)
}

/// Current position in the navigation table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    current: Route,
    path: String,
}

impl Router {
    pub fn new(start_path: &str) -> Self {
        Self {
            current: resolve(start_path),
            path: start_path.to_string(),
        }
    }

    pub fn navigate(&mut self, path: &str) {
        self.current = resolve(path);
        self.path = path.to_string();
        debug!("Navigated to {} ({:?})", path, self.current);
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// The path as requested, including unmatched ones
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new("/")
    }
}
