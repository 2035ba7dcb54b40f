//! Service Integration Tests
//!
//! Auth and parameter clients against a scripted in-memory transport.

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};
    use std::rc::Rc;

    use crate::domain::{list, ApiError, ApiResult, LookupRequest};
    use crate::services::config::{DEFAULT_PARAMETERS_URL, DEFAULT_TOKEN_URL};
    use crate::services::{
        ApiConfig, AuthClient, HttpRequest, HttpResponse, HttpTransport, MemoryTokenStorage,
        ParameterClient, ReauthPolicy, TokenStorage,
    };

    /// Replies per URL in FIFO order and records every request
    #[derive(Default)]
    struct ScriptedTransport {
        replies: RefCell<HashMap<String, VecDeque<ApiResult<HttpResponse>>>>,
        requests: RefCell<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn reply(&self, url: &str, status: u16, body: &str) {
            self.replies
                .borrow_mut()
                .entry(url.to_string())
                .or_default()
                .push_back(Ok(HttpResponse {
                    status,
                    body: body.to_string(),
                }));
        }

        fn fail(&self, url: &str, error: ApiError) {
            self.replies
                .borrow_mut()
                .entry(url.to_string())
                .or_default()
                .push_back(Err(error));
        }

        fn calls_to(&self, url: &str) -> Vec<HttpRequest> {
            self.requests
                .borrow()
                .iter()
                .filter(|r| r.url == url)
                .cloned()
                .collect()
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for ScriptedTransport {
        async fn post_json(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
            let url = request.url.clone();
            self.requests.borrow_mut().push(request);
            self.replies
                .borrow_mut()
                .get_mut(&url)
                .and_then(VecDeque::pop_front)
                .unwrap_or_else(|| Err(ApiError::Network(format!("no reply scripted for {}", url))))
        }
    }

    const LOOKUPS_OK: &str = r#"{
        "codigo": 1,
        "descripcion": "OK",
        "mensajeUsuario": null,
        "entidad": {
            "Distritos": [
                { "codigo": "1", "descripcion": "LIMA NORTE", "valorAlf": null },
                { "codigo": "2", "descripcion": "CALLAO", "valorAlf": "CAL" }
            ],
            "Sucursales": []
        }
    }"#;

    fn config() -> ApiConfig {
        ApiConfig::default().with_credentials("operador", "clave")
    }

    fn setup(config: ApiConfig) -> (Rc<ScriptedTransport>, Rc<MemoryTokenStorage>, ParameterClient<ScriptedTransport, Rc<MemoryTokenStorage>>) {
        let transport = Rc::new(ScriptedTransport::default());
        let storage = Rc::new(MemoryTokenStorage::new());
        let client = ParameterClient::new(transport.clone(), storage.clone(), config);
        (transport, storage, client)
    }

    // ========================
    // Auth client
    // ========================

    #[tokio::test]
    async fn test_authenticate_sends_token_body_and_stores_token() {
        let transport = Rc::new(ScriptedTransport::default());
        let storage = Rc::new(MemoryTokenStorage::new());
        let auth = AuthClient::new(transport.clone(), storage.clone(), Rc::new(config()));
        transport.reply(DEFAULT_TOKEN_URL, 200, r#"{ "Token": "abc123" }"#);

        let token = auth.authenticate("operador", "clave").await.expect("token");
        assert_eq!(token, "abc123");
        assert!(auth.is_authenticated());
        assert_eq!(storage.load().as_deref(), Some("abc123"));

        let sent = &transport.calls_to(DEFAULT_TOKEN_URL)[0];
        assert_eq!(
            sent.body,
            serde_json::json!({
                "datosToken": {
                    "Usuario": "operador",
                    "Password": "clave",
                    "KeyDominio": "LDS",
                    "Empresa": "7",
                    "EmpresaTrabaja": "7",
                    "TipoDispositivo": "WEB"
                }
            })
        );
    }

    #[tokio::test]
    async fn test_authenticate_overwrites_previous_token() {
        let transport = Rc::new(ScriptedTransport::default());
        let storage = Rc::new(MemoryTokenStorage::with_token("viejo"));
        let auth = AuthClient::new(transport.clone(), storage.clone(), Rc::new(config()));
        assert_eq!(auth.current_token().as_deref(), Some("viejo"));

        transport.reply(DEFAULT_TOKEN_URL, 200, r#"{ "Token": "nuevo" }"#);
        auth.authenticate("operador", "clave").await.unwrap();
        assert_eq!(auth.current_token().as_deref(), Some("nuevo"));
        assert_eq!(storage.load().as_deref(), Some("nuevo"));
    }

    #[tokio::test]
    async fn test_authenticate_http_error_is_network_error() {
        let transport = Rc::new(ScriptedTransport::default());
        let storage = Rc::new(MemoryTokenStorage::new());
        let auth = AuthClient::new(transport.clone(), storage.clone(), Rc::new(config()));
        transport.reply(DEFAULT_TOKEN_URL, 401, "Unauthorized");

        let err = auth.authenticate("operador", "mala").await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert!(!auth.is_authenticated());
        assert!(storage.load().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_memory_and_storage() {
        let transport = Rc::new(ScriptedTransport::default());
        let storage = Rc::new(MemoryTokenStorage::with_token("t0"));
        let auth = AuthClient::new(transport, storage.clone(), Rc::new(config()));
        assert!(auth.is_authenticated());

        auth.logout();
        assert!(!auth.is_authenticated());
        assert!(storage.load().is_none());
    }

    // ========================
    // Parameter client
    // ========================

    #[tokio::test]
    async fn test_fetch_lookups_reauthenticates_and_sends_header() {
        let (transport, _storage, client) = setup(config());
        transport.reply(DEFAULT_TOKEN_URL, 200, r#"{ "Token": "tok-1" }"#);
        transport.reply(DEFAULT_PARAMETERS_URL, 200, LOOKUPS_OK);

        let bundle = client.initial_lookups().await.expect("bundle");
        assert_eq!(bundle.get(list::DISTRITOS).len(), 2);
        assert_eq!(bundle.get(list::DISTRITOS)[1].alt_value.as_deref(), Some("CAL"));
        assert!(bundle.get(list::SUCURSALES).is_empty());

        let sent = &transport.calls_to(DEFAULT_PARAMETERS_URL)[0];
        assert_eq!(sent.header_value("authLDS"), Some("tok-1"));
        assert_eq!(
            sent.body,
            serde_json::json!({ "TipoIdLlamada": 0, "Distritos": 0, "Sucursales": 0 })
        );
    }

    #[tokio::test]
    async fn test_every_fetch_requests_a_new_token_by_default() {
        let (transport, _storage, client) = setup(config());
        for token in ["t1", "t2"] {
            transport.reply(DEFAULT_TOKEN_URL, 200, &format!(r#"{{ "Token": "{}" }}"#, token));
            transport.reply(DEFAULT_PARAMETERS_URL, 200, LOOKUPS_OK);
        }

        client.initial_lookups().await.unwrap();
        client.initial_lookups().await.unwrap();

        assert_eq!(transport.calls_to(DEFAULT_TOKEN_URL).len(), 2);
        let headers: Vec<_> = transport
            .calls_to(DEFAULT_PARAMETERS_URL)
            .iter()
            .map(|r| r.header_value("authLDS").unwrap_or_default().to_string())
            .collect();
        assert_eq!(headers, vec!["t1", "t2"]);
    }

    #[tokio::test]
    async fn test_reuse_policy_skips_auth_when_token_present() {
        let mut cfg = config();
        cfg.reauth_policy = ReauthPolicy::ReuseStored;
        let (transport, _storage, client) = setup(cfg);
        transport.reply(DEFAULT_TOKEN_URL, 200, r#"{ "Token": "t1" }"#);
        transport.reply(DEFAULT_PARAMETERS_URL, 200, LOOKUPS_OK);
        transport.reply(DEFAULT_PARAMETERS_URL, 200, LOOKUPS_OK);

        client.initial_lookups().await.unwrap();
        client.initial_lookups().await.unwrap();

        assert_eq!(transport.calls_to(DEFAULT_TOKEN_URL).len(), 1);
        assert_eq!(transport.calls_to(DEFAULT_PARAMETERS_URL).len(), 2);
    }

    #[tokio::test]
    async fn test_missing_token_fails_without_parameter_request() {
        let (transport, _storage, client) = setup(config());
        transport.reply(DEFAULT_TOKEN_URL, 200, r#"{ "Token": "" }"#);

        let err = client.advanced_filter_lookups().await.unwrap_err();
        assert!(err.is_auth());
        assert!(transport.calls_to(DEFAULT_PARAMETERS_URL).is_empty());

        transport.reply(DEFAULT_TOKEN_URL, 200, "{}");
        let err = client.initial_lookups().await.unwrap_err();
        assert!(err.is_auth());
        assert!(transport.calls_to(DEFAULT_PARAMETERS_URL).is_empty());
    }

    #[tokio::test]
    async fn test_no_credentials_is_auth_error_without_any_request() {
        let (transport, _storage, client) = setup(ApiConfig::default());
        let err = client.initial_lookups().await.unwrap_err();
        assert!(err.is_auth());
        assert!(transport.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        let (transport, _storage, client) = setup(config());
        transport.reply(DEFAULT_TOKEN_URL, 200, r#"{ "Token": "t1" }"#);
        transport.fail(DEFAULT_PARAMETERS_URL, ApiError::Network("connection reset".into()));

        let err = client.initial_lookups().await.unwrap_err();
        assert_eq!(err, ApiError::Network("connection reset".into()));
    }

    #[tokio::test]
    async fn test_http_status_failure_is_network_error() {
        let (transport, _storage, client) = setup(config());
        transport.reply(DEFAULT_TOKEN_URL, 200, r#"{ "Token": "t1" }"#);
        transport.reply(DEFAULT_PARAMETERS_URL, 502, "Bad Gateway");

        let err = client.initial_lookups().await.unwrap_err();
        assert_eq!(err, ApiError::Network("HTTP 502".into()));
    }

    #[tokio::test]
    async fn test_non_success_code_is_application_error() {
        let (transport, _storage, client) = setup(config());
        transport.reply(DEFAULT_TOKEN_URL, 200, r#"{ "Token": "t1" }"#);
        transport.reply(
            DEFAULT_PARAMETERS_URL,
            200,
            r#"{ "codigo": 0, "descripcion": "ERROR", "mensajeUsuario": "Token vencido", "entidad": null }"#,
        );

        let err = client.initial_lookups().await.unwrap_err();
        assert_eq!(err, ApiError::Application("Token vencido".into()));
    }

    #[tokio::test]
    async fn test_children_request_body() {
        let (transport, _storage, client) = setup(config());
        transport.reply(DEFAULT_TOKEN_URL, 200, r#"{ "Token": "t1" }"#);
        transport.reply(
            DEFAULT_PARAMETERS_URL,
            200,
            r#"{ "codigo": 1, "descripcion": "OK", "entidad": { "Tipos": [ { "codigo": "1", "descripcion": "M - MASIVOS", "valorAlf": "M" } ] } }"#,
        );

        let request = LookupRequest::children_of(list::TIPOS, "2").unwrap();
        let mut bundle = client.fetch_lookups(&request).await.unwrap();
        assert_eq!(bundle.take(list::TIPOS)[0].label, "M - MASIVOS");
        assert_eq!(
            transport.calls_to(DEFAULT_PARAMETERS_URL)[0].body,
            serde_json::json!({ "Tipos": 2 })
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let (transport, _storage, client) = setup(config());
        transport.reply(DEFAULT_TOKEN_URL, 200, r#"{ "Token": "t1" }"#);
        transport.reply(DEFAULT_PARAMETERS_URL, 200, "<html>login</html>");

        let err = client.initial_lookups().await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }
}
