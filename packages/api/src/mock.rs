use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::error::TransportError;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};

#[derive(Clone, Debug)]
enum Reply {
    Respond(HttpResponse),
    Unreachable,
}

#[derive(Clone, Debug)]
struct Route {
    method: Method,
    path: String,
    reply: Reply,
}

#[derive(Debug, Default)]
struct State {
    routes: Vec<Route>,
    requests: Vec<HttpRequest>,
    offline: bool,
}

/// Scripted in-memory Transport for tests.
///
/// Routes match on method and URL path (query string ignored). The most
/// recently registered route wins. Unmatched requests get a 404 with an
/// `error` body. Every request is recorded, matched or not.
#[derive(Clone, Debug, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport on which every request fails before reaching a server.
    pub fn offline() -> Self {
        let transport = Self::new();
        transport.lock().offline = true;
        transport
    }

    /// Answer `method path` with `status` and a JSON body.
    pub fn on(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.on_raw(method, path, status, body.to_string().as_bytes())
    }

    /// Answer `method path` with `status` and an arbitrary body.
    pub fn on_raw(&self, method: Method, path: &str, status: u16, body: &[u8]) -> &Self {
        self.push(method, path, Reply::Respond(HttpResponse {
            status,
            body: body.to_vec(),
        }))
    }

    /// Fail `method path` at the transport level.
    pub fn unreachable(&self, method: Method, path: &str) -> &Self {
        self.push(method, path, Reply::Unreachable)
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock().requests.clone()
    }

    /// Requests whose URL path equals `path`.
    pub fn requests_to(&self, path: &str) -> Vec<HttpRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|request| url_path(&request.url) == path)
            .cloned()
            .collect()
    }

    fn push(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.lock().routes.push(Route {
            method,
            path: path.to_string(),
            reply,
        });
        self
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Path component of an absolute URL, without query string.
fn url_path(url: &str) -> &str {
    let without_query = url.split('?').next().unwrap_or(url);
    let after_scheme = without_query
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(without_query);
    after_scheme
        .find('/')
        .map(|idx| &after_scheme[idx..])
        .unwrap_or("/")
}

impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.lock();
        state.requests.push(request.clone());
        if state.offline {
            return Err(TransportError("offline".to_string()));
        }

        let path = url_path(&request.url);
        let reply = state
            .routes
            .iter()
            .rev()
            .find(|route| route.method == request.method && route.path == path)
            .map(|route| route.reply.clone());

        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Unreachable) => Err(TransportError("connection refused".to_string())),
            None => Ok(HttpResponse {
                status: 404,
                body: br#"{"error":"Not found"}"#.to_vec(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_path() {
        assert_eq!(url_path("http://localhost:5000/api/login"), "/api/login");
        assert_eq!(
            url_path("https://x.test/api/hospital/find_patient?cid=A%201"),
            "/api/hospital/find_patient"
        );
        assert_eq!(url_path("https://x.test"), "/");
    }
}
