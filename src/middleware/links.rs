use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::{HeaderMap, header, request::Parts};
use std::convert::Infallible;
use url::Url;

use crate::router::CadastroState;

/// Builds absolute link targets for hypermedia envelopes.
///
/// The base comes from `basic.public_url` when configured, otherwise from the
/// request's `Host` / `X-Forwarded-Proto` headers. Without either, links are
/// absolute paths.
#[derive(Debug, Clone)]
pub struct LinkContext {
    base: Option<Url>,
    /// Path and query of the current request, before router nesting strips it.
    current: String,
}

impl LinkContext {
    pub fn new(base: Option<Url>, current: impl Into<String>) -> Self {
        Self {
            base: base.map(with_trailing_slash),
            current: current.into(),
        }
    }

    /// Resolve an absolute path (`/cadastro/agua/1`) under the base, keeping any
    /// path prefix the base carries (`https://gw/api/` -> `https://gw/api/cadastro/agua/1`).
    pub fn href(&self, path: &str) -> String {
        match &self.base {
            Some(base) => base
                .join(path.trim_start_matches('/'))
                .map(String::from)
                .unwrap_or_else(|_| path.to_string()),
            None => path.to_string(),
        }
    }

    /// The current request URL, query string included.
    pub fn current(&self) -> String {
        self.href(&self.current)
    }

    /// The current request path with `/{id}` appended (creation `Location`).
    pub fn current_with_id(&self, id: i64) -> String {
        let path = self.current.split('?').next().unwrap_or_default();
        self.href(&format!("{}/{id}", path.trim_end_matches('/')))
    }
}

/// `Url::join` treats the last path segment as a file unless it ends in `/`.
fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

fn base_from_headers(headers: &HeaderMap) -> Option<Url> {
    let host = headers.get(header::HOST)?.to_str().ok()?;
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .filter(|s| *s == "http" || *s == "https")
        .unwrap_or("http");
    Url::parse(&format!("{scheme}://{host}/")).ok()
}

impl FromRequestParts<CadastroState> for LinkContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &CadastroState,
    ) -> Result<Self, Self::Rejection> {
        let base = state
            .config
            .basic
            .public_url
            .clone()
            .or_else(|| base_from_headers(&parts.headers));

        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map(|OriginalUri(uri)| uri)
            .unwrap_or(&parts.uri);
        let current = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string());

        Ok(Self::new(base, current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_against_the_base() {
        let base = Url::parse("https://api.example.org/").ok();
        let ctx = LinkContext::new(base, "/cadastro/agua?page=1&size=5");
        assert_eq!(
            ctx.current(),
            "https://api.example.org/cadastro/agua?page=1&size=5"
        );
        assert_eq!(
            ctx.current_with_id(42),
            "https://api.example.org/cadastro/agua/42"
        );
        assert_eq!(
            ctx.href("/cadastro/id/3"),
            "https://api.example.org/cadastro/id/3"
        );
    }

    #[test]
    fn keeps_the_path_prefix_of_the_base() {
        let base = Url::parse("https://gw.example.org/api/").ok();
        let ctx = LinkContext::new(base, "/cadastro/agua/1");
        assert_eq!(ctx.current(), "https://gw.example.org/api/cadastro/agua/1");
        assert_eq!(
            ctx.href("/cadastro/id/3"),
            "https://gw.example.org/api/cadastro/id/3"
        );

        let no_slash = Url::parse("https://gw.example.org/api").ok();
        let ctx = LinkContext::new(no_slash, "/cadastro/potencial?page=2");
        assert_eq!(
            ctx.current(),
            "https://gw.example.org/api/cadastro/potencial?page=2"
        );
        assert_eq!(
            ctx.current_with_id(9),
            "https://gw.example.org/api/cadastro/potencial/9"
        );
    }

    #[test]
    fn falls_back_to_paths_without_a_base() {
        let ctx = LinkContext::new(None, "/cadastro/potencial/");
        assert_eq!(ctx.current_with_id(7), "/cadastro/potencial/7");
    }

    #[test]
    fn host_header_builds_the_base() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, "localhost:8000".parse().unwrap());
        headers.insert("x-forwarded-proto", "https".parse().unwrap());
        let base = base_from_headers(&headers).unwrap();
        assert_eq!(base.as_str(), "https://localhost:8000/");
    }
}
