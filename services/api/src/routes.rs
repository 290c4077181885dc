//! Static route table and the axum router built from it.
//!
//! Routes are matched on exact method and path. Anything else, including a known path
//! with an unregistered method, resolves to the canonical 404 response.

use crate::handlers;
use crate::state::AppState;
use axum::http::Method;
use axum::routing::{on, MethodFilter, MethodRouter};
use axum::Router;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Ping,
    Demo,
    ContractorRequest,
    SocialQualify,
}

impl HandlerKind {
    fn endpoint(self, filter: MethodFilter) -> MethodRouter<AppState> {
        match self {
            HandlerKind::Ping => on(filter, handlers::ping),
            HandlerKind::Demo => on(filter, handlers::demo),
            HandlerKind::ContractorRequest => on(filter, handlers::contractor_request),
            HandlerKind::SocialQualify => on(filter, handlers::social_qualify),
        }
    }
}

/// Methods the route table registers handlers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteMethod {
    Get,
    Post,
}

impl RouteMethod {
    pub fn as_method(self) -> Method {
        match self {
            RouteMethod::Get => Method::GET,
            RouteMethod::Post => Method::POST,
        }
    }

    fn filter(self) -> MethodFilter {
        match self {
            RouteMethod::Get => MethodFilter::GET,
            RouteMethod::Post => MethodFilter::POST,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RouteDescriptor {
    pub method: RouteMethod,
    pub path: &'static str,
    pub handler: HandlerKind,
}

pub static ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor {
        method: RouteMethod::Get,
        path: "/api/ping",
        handler: HandlerKind::Ping,
    },
    RouteDescriptor {
        method: RouteMethod::Post,
        path: "/api/ping",
        handler: HandlerKind::Ping,
    },
    RouteDescriptor {
        method: RouteMethod::Get,
        path: "/api/demo",
        handler: HandlerKind::Demo,
    },
    RouteDescriptor {
        method: RouteMethod::Post,
        path: "/api/demo",
        handler: HandlerKind::Demo,
    },
    RouteDescriptor {
        method: RouteMethod::Post,
        path: "/api/contractor-request",
        handler: HandlerKind::ContractorRequest,
    },
    RouteDescriptor {
        method: RouteMethod::Post,
        path: "/api/social-qualify",
        handler: HandlerKind::SocialQualify,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handler(HandlerKind),
    NotFound,
}

pub fn dispatch(method: &Method, path: &str) -> Dispatch {
    ROUTES
        .iter()
        .find(|route| route.method.as_method() == *method && route.path == path)
        .map_or(Dispatch::NotFound, |route| Dispatch::Handler(route.handler))
}

/// Build the router for [`ROUTES`]. Each path gets one method router whose fallback is
/// the 404 handler, so unmatched methods never surface as 405.
pub fn router(state: AppState) -> Router {
    let mut by_path: BTreeMap<&'static str, MethodRouter<AppState>> = BTreeMap::new();

    for route in ROUTES {
        let endpoint = route.handler.endpoint(route.method.filter());
        let methods = match by_path.remove(route.path) {
            Some(existing) => existing.merge(endpoint),
            None => endpoint,
        };
        by_path.insert(route.path, methods);
    }

    by_path
        .into_iter()
        .fold(Router::new(), |router, (path, methods)| {
            router.route(path, methods.fallback(handlers::not_found))
        })
        .fallback(handlers::not_found)
        .with_state(state)
}
