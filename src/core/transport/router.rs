//! Request path classification for the HTTP surface.
//!
//! One routing decision per request: the path either belongs to the
//! streaming binding, the unary binding, or nothing. An unmatched path is
//! a defined 404, not an error. No session state lives here.

use super::config::HttpConfig;

/// The transport binding a request path resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Streaming SSE binding (the SSE path and its message sub-path).
    Streaming,

    /// Unary JSON-RPC binding.
    Unary,

    /// No binding; respond 404 with an empty body.
    NotFound,
}

impl Endpoint {
    /// Classify a request path against the configured endpoint paths.
    pub fn classify(path: &str, config: &HttpConfig) -> Self {
        if path == config.sse_path || path == config.message_path() {
            Self::Streaming
        } else if path == config.rpc_path {
            Self::Unary
        } else {
            Self::NotFound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> HttpConfig {
        HttpConfig::default()
    }

    #[test]
    fn test_sse_paths_resolve_to_streaming() {
        assert_eq!(Endpoint::classify("/sse", &config()), Endpoint::Streaming);
        assert_eq!(
            Endpoint::classify("/sse/message", &config()),
            Endpoint::Streaming
        );
    }

    #[test]
    fn test_rpc_path_resolves_to_unary() {
        assert_eq!(Endpoint::classify("/mcp", &config()), Endpoint::Unary);
    }

    #[test]
    fn test_unknown_paths_are_not_found() {
        assert_eq!(Endpoint::classify("/", &config()), Endpoint::NotFound);
        assert_eq!(Endpoint::classify("/unknown", &config()), Endpoint::NotFound);
        assert_eq!(
            Endpoint::classify("/sse/other", &config()),
            Endpoint::NotFound
        );
        assert_eq!(Endpoint::classify("/mcp/", &config()), Endpoint::NotFound);
    }

    #[test]
    fn test_classification_follows_configured_paths() {
        let config = HttpConfig {
            sse_path: "/events".to_string(),
            rpc_path: "/rpc".to_string(),
            ..HttpConfig::default()
        };
        assert_eq!(Endpoint::classify("/events", &config), Endpoint::Streaming);
        assert_eq!(
            Endpoint::classify("/events/message", &config),
            Endpoint::Streaming
        );
        assert_eq!(Endpoint::classify("/rpc", &config), Endpoint::Unary);
        assert_eq!(Endpoint::classify("/sse", &config), Endpoint::NotFound);
    }
}
