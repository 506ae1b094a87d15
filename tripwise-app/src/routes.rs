/// Views the application can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
    BookTrip,
    MyTrips,
    NotFound,
}

impl Route {
    pub fn from_path(path: &str) -> Route {
        match path.trim() {
            "/login" => Route::Login,
            "/" => Route::Home,
            "/book-a-new-trip" => Route::BookTrip,
            "/my-trips" => Route::MyTrips,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Home => "/",
            Route::BookTrip => "/book-a-new-trip",
            Route::MyTrips => "/my-trips",
            Route::NotFound => "*",
        }
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

/// The route that actually renders for `requested`
pub fn resolve(requested: Route, authorized: bool) -> Route {
    match requested {
        Route::Login if authorized => Route::Home,
        route if route.is_protected() && !authorized => Route::Login,
        route => route,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_routes_redirect_to_login() {
        for path in ["/", "/book-a-new-trip", "/my-trips", "/nowhere"] {
            assert_eq!(resolve(Route::from_path(path), false), Route::Login);
        }
        assert_eq!(resolve(Route::Login, false), Route::Login);
    }

    #[test]
    fn test_signed_in_users_skip_login() {
        assert_eq!(resolve(Route::Login, true), Route::Home);
        assert_eq!(resolve(Route::BookTrip, true), Route::BookTrip);
        assert_eq!(resolve(Route::from_path("/nowhere"), true), Route::NotFound);
    }
}
