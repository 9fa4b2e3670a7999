use super::state::View;

/// Route table entry: a navigable view plus whether it needs a session.
#[derive(Debug, Clone, Copy)]
pub struct RouteConfig {
    pub path: &'static str,
    pub title: &'static str,
    pub view: View,
    pub protected: bool,
}

pub fn route_configs() -> &'static [RouteConfig] {
    &[
        RouteConfig {
            path: "/",
            title: "Home",
            view: View::Home,
            protected: false,
        },
        RouteConfig {
            path: "/login",
            title: "Sign in",
            view: View::Login,
            protected: false,
        },
        RouteConfig {
            path: "/callback/spotify",
            title: "Connecting",
            view: View::Callback,
            protected: false,
        },
        RouteConfig {
            path: "/library",
            title: "Library",
            view: View::Library,
            protected: true,
        },
    ]
}

/// Routes shown in the navigation bar. The callback route is reachable
/// only through the OAuth redirect, never via the bar.
pub fn nav_configs(logged_in: bool) -> &'static [RouteConfig] {
    if logged_in {
        &[
            RouteConfig {
                path: "/",
                title: "Home",
                view: View::Home,
                protected: false,
            },
            RouteConfig {
                path: "/library",
                title: "Library",
                view: View::Library,
                protected: true,
            },
        ]
    } else {
        &[
            RouteConfig {
                path: "/",
                title: "Home",
                view: View::Home,
                protected: false,
            },
            RouteConfig {
                path: "/login",
                title: "Sign in",
                view: View::Login,
                protected: false,
            },
        ]
    }
}

pub fn nav_index_for_view(view: View, logged_in: bool) -> Option<usize> {
    nav_configs(logged_in).iter().position(|c| c.view == view)
}

pub fn path_for_view(view: View) -> &'static str {
    route_configs()
        .iter()
        .find(|c| c.view == view)
        .map(|c| c.path)
        .unwrap_or("/")
}

fn is_protected(view: View) -> bool {
    route_configs()
        .iter()
        .any(|c| c.view == view && c.protected)
}

/// Substitute the login view for protected targets while signed out.
/// Every navigation in the core goes through here.
pub fn resolve_route(target: View, logged_in: bool) -> View {
    if is_protected(target) && !logged_in {
        View::Login
    } else {
        target
    }
}
