//! Tests for `AddressApi`.

use super::*;
use crate::api::HttpResponse;
use std::sync::Mutex;

/// Mock HTTP client that returns one canned response and records requests.
#[derive(Debug)]
struct MockClient {
    response: Mutex<Option<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    fn new(response: Result<HttpResponse, HttpError>) -> Self {
        Self {
            response: Mutex::new(Some(response)),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn status(status: u16, body: &str) -> Self {
        Self::new(Ok(HttpResponse::new(
            http::StatusCode::from_u16(status).unwrap(),
            http::HeaderMap::new(),
            body.as_bytes().to_vec(),
        )))
    }

    fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.response
            .lock()
            .unwrap()
            .take()
            .expect("MockClient called more than once")
    }
}

fn params() -> RequestParameters {
    RequestParameters::new("gp_gateway", "active", "deployed")
}

fn api(client: MockClient) -> AddressApi<MockClient> {
    AddressApi::new(client, Endpoint::Prod, ApiKey::new("secret-key"))
}

mod endpoint {
    use super::*;

    #[test]
    fn prod_and_prod6_urls() {
        assert_eq!(
            Endpoint::Prod.url().unwrap().as_str(),
            "https://api.prod.datapath.prismaaccess.com/getPrismaAccessIP/v2"
        );
        assert_eq!(
            Endpoint::Prod6.url().unwrap().host_str(),
            Some("api.prod6.datapath.prismaaccess.com")
        );
    }

    #[test]
    fn custom_url_is_used_verbatim() {
        let url = url::Url::parse("https://mirror.example.com/ips").unwrap();
        let endpoint = Endpoint::Custom(url.clone());

        assert_eq!(endpoint.url().unwrap(), url);
        assert_eq!(endpoint.to_string(), "https://mirror.example.com/ips");
    }
}

mod api_key {
    use super::*;

    #[test]
    fn debug_and_display_are_redacted() {
        let key = ApiKey::new("secret-key");

        assert!(!format!("{key:?}").contains("secret-key"));
        assert!(!key.to_string().contains("secret-key"));
        assert_eq!(key.expose(), "secret-key");
    }
}

mod request {
    use super::*;

    #[test]
    fn posts_json_body_with_key_header() {
        let api = api(MockClient::status(200, "{}"));

        let req = api.build_request(&params()).unwrap();

        assert_eq!(req.method, http::Method::POST);
        assert_eq!(req.headers.get(API_KEY_HEADER).unwrap(), "secret-key");
        assert!(req.headers.get(API_KEY_HEADER).unwrap().is_sensitive());
        assert_eq!(
            req.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "serviceType": "gp_gateway",
                "addrType": "active",
                "location": "deployed"
            })
        );
    }

    #[test]
    fn rejects_key_with_newline() {
        let api = AddressApi::new(
            MockClient::status(200, "{}"),
            Endpoint::Prod,
            ApiKey::new("bad\nkey"),
        );

        assert!(matches!(
            api.build_request(&params()),
            Err(ApiError::InvalidKey)
        ));
    }
}

mod fetch {
    use super::*;

    #[tokio::test]
    async fn success_returns_body() {
        let api = api(MockClient::status(200, r#"{"result":[]}"#));

        let body = api.fetch(&params()).await.unwrap();

        assert_eq!(body, br#"{"result":[]}"#.to_vec());
        assert_eq!(api.client.captured_requests().len(), 1);
    }

    #[tokio::test]
    async fn unauthorized_is_reported_with_guidance() {
        let api = api(MockClient::status(401, "denied"));

        let err = api.fetch(&params()).await.unwrap_err();

        assert!(err.is_unauthorized());
        assert!(err.to_string().contains("--endpoint2"));
    }

    #[tokio::test]
    async fn other_status_is_propagated() {
        let api = api(MockClient::status(503, "maintenance"));

        let err = api.fetch(&params()).await.unwrap_err();

        match err {
            ApiError::Status { status, body, .. } => {
                assert_eq!(status, http::StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(body, "maintenance");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_error_is_not_retried() {
        let api = api(MockClient::new(Err(HttpError::Timeout)));

        let err = api.fetch(&params()).await.unwrap_err();

        assert!(matches!(err, ApiError::Http(HttpError::Timeout)));
        assert_eq!(api.client.captured_requests().len(), 1);
    }
}
