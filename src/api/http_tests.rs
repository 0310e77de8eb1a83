//! Tests for HTTP request/response types.

use super::{HttpRequest, HttpResponse};

fn url() -> url::Url {
    url::Url::parse("https://example.com/api").unwrap()
}

mod http_request {
    use super::*;

    #[test]
    fn post_creates_empty_post_request() {
        let req = HttpRequest::post(url());

        assert_eq!(req.method, http::Method::POST);
        assert_eq!(req.url, url());
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn with_body_sets_body() {
        let req = HttpRequest::post(url()).with_body(b"{}".to_vec());
        assert_eq!(req.body.as_deref(), Some(&b"{}"[..]));
    }

    #[test]
    fn with_header_appends_values() {
        let name = http::HeaderName::from_static("x-test");
        let req = HttpRequest::post(url())
            .with_header(name.clone(), http::HeaderValue::from_static("a"))
            .with_header(name.clone(), http::HeaderValue::from_static("b"));

        assert_eq!(req.headers.get_all(&name).iter().count(), 2);
    }

    #[test]
    fn debug_redacts_sensitive_headers() {
        let mut secret = http::HeaderValue::from_static("super-secret");
        secret.set_sensitive(true);
        let req = HttpRequest::post(url())
            .with_header(http::HeaderName::from_static("header-api-key"), secret)
            .with_header(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("application/json"),
            );

        let debug = format!("{req:?}");

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("application/json"));
    }
}

mod http_response {
    use super::*;

    #[test]
    fn is_success_for_2xx_only() {
        let ok = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), vec![]);
        let denied = HttpResponse::new(
            http::StatusCode::UNAUTHORIZED,
            http::HeaderMap::new(),
            vec![],
        );

        assert!(ok.is_success());
        assert!(!denied.is_success());
    }

    #[test]
    fn body_lossy_replaces_invalid_utf8() {
        let resp = HttpResponse::new(
            http::StatusCode::OK,
            http::HeaderMap::new(),
            vec![b'o', b'k', 0xff],
        );

        assert_eq!(resp.body_lossy(), "ok\u{fffd}");
    }
}
