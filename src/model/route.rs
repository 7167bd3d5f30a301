use std::fmt;

/// A client-side route; each one maps to a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Users,
    Dashboard,
    Projects,
    Tasks,
    Login,
    Register,
}

impl Route {
    /// All routes in sidebar order
    pub const ALL: [Route; 7] = [
        Route::Home,
        Route::Dashboard,
        Route::Users,
        Route::Projects,
        Route::Tasks,
        Route::Login,
        Route::Register,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Users => "/users",
            Route::Dashboard => "/dashboard",
            Route::Projects => "/projects",
            Route::Tasks => "/tasks",
            Route::Login => "/login",
            Route::Register => "/register",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Users => "Users",
            Route::Dashboard => "Dashboard",
            Route::Projects => "Projects",
            Route::Tasks => "Tasks",
            Route::Login => "Login",
            Route::Register => "Register",
        }
    }

    /// Parse a path; a trailing slash is tolerated
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        Route::ALL.into_iter().find(|r| r.path() == normalized)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
