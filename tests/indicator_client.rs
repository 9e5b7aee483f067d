#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate};
    use ecotech::api::mindicador::{parse_series, IndicatorApiConfig, IndicatorClient};
    use ecotech::db::db::{DatabaseConfig, Db};
    use ecotech::db::indicator_queries::IndicatorQueries;
    use ecotech::db::indicators::EconomicIndicators;
    use ecotech::db::schema;
    use ecotech::db::users::Users;
    use ecotech::libs::error::{AppError, ServiceError};
    use ecotech::libs::indicator::{IndicatorCode, IndicatorService};
    use ecotech::libs::messages::Message;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    struct ClientTestContext {
        db: Db,
        _temp_dir: TempDir,
        user_id: i64,
    }

    impl AsyncTestContext for ClientTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(DatabaseConfig::at(temp_dir.path().join("ecotech.db"))).unwrap();
            schema::initialize(&db).unwrap();
            let user_id = Users::new(&db).find_by_username("empleado1").unwrap().unwrap().id;

            ClientTestContext {
                db,
                _temp_dir: temp_dir,
                user_id,
            }
        }
    }

    impl ClientTestContext {
        fn audit_rows(&self) -> usize {
            IndicatorQueries::new(&self.db).list_for_user(self.user_id, 100).unwrap().len()
        }
    }

    /// Answers a single request with a canned response. The join handle
    /// yields the request line that was received.
    async fn serve_once(status: &'static str, body: String) -> (IndicatorClient, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let read = socket.read(&mut chunk).await.unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..read]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            String::from_utf8_lossy(&request).lines().next().unwrap_or_default().to_string()
        });

        (client_for(&format!("http://{}/api", addr)), handle)
    }

    fn client_for(base_url: &str) -> IndicatorClient {
        IndicatorClient::new(&IndicatorApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            use_system_proxy: false,
        })
        .unwrap()
    }

    fn series(code: &str, date: NaiveDate, value: f64) -> String {
        format!(
            r#"{{"version":"1.7.0","autor":"mindicador.cl","codigo":"{}","unidad_medida":"Pesos","serie":[{{"fecha":"{}T03:00:00.000Z","valor":{}}}]}}"#,
            code,
            date.format("%Y-%m-%d"),
            value
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_url_shape() {
        let client = client_for("https://mindicador.cl/api/");
        assert_eq!(client.url(IndicatorCode::Uf, None), "https://mindicador.cl/api/uf");
        assert_eq!(
            client.url(IndicatorCode::Dolar, Some(date(2025, 1, 2))),
            "https://mindicador.cl/api/dolar/02-01-2025"
        );
    }

    #[test]
    fn test_parse_series() {
        let reading = parse_series(IndicatorCode::Euro, &series("euro", date(2025, 1, 2), 1031.25))
            .unwrap()
            .unwrap();
        assert_eq!(reading.date, date(2025, 1, 2));
        assert_eq!(reading.value, 1031.25);

        let text_value = r#"{"serie":[{"fecha":"2025-01-02T03:00:00.000Z","valor":"950.5"}]}"#;
        assert_eq!(parse_series(IndicatorCode::Dolar, text_value).unwrap().unwrap().value, 950.5);

        assert!(parse_series(IndicatorCode::Dolar, r#"{"serie":[]}"#).unwrap().is_none());
        assert!(parse_series(IndicatorCode::Dolar, r#"{"codigo":"dolar"}"#).unwrap().is_none());

        assert!(matches!(
            parse_series(IndicatorCode::Dolar, "<html>"),
            Err(AppError::ExternalService(ServiceError::Malformed(_)))
        ));
        assert!(matches!(
            parse_series(IndicatorCode::Dolar, r#"{"serie":[{"fecha":"ayer","valor":1}]}"#),
            Err(AppError::ExternalService(ServiceError::Malformed(_)))
        ));
        assert!(matches!(
            parse_series(IndicatorCode::Dolar, r#"{"serie":[{"fecha":"2025-01-02","valor":null}]}"#),
            Err(AppError::ExternalService(ServiceError::Malformed(_)))
        ));
    }

    #[tokio::test]
    async fn test_latest_value_uses_date_from_response() {
        let today = Local::now().date_naive();
        let (client, server) = serve_once("200 OK", series("uf", today, 39_123.45)).await;

        let reading = client.fetch(IndicatorCode::Uf, None).await.unwrap().unwrap();

        assert_eq!(reading.code, IndicatorCode::Uf);
        assert_eq!(reading.date, today);
        assert_eq!(reading.value, 39_123.45);
        assert_eq!(server.await.unwrap(), "GET /api/uf HTTP/1.1");
    }

    #[tokio::test]
    async fn test_dated_request_path() {
        let (client, server) = serve_once("200 OK", series("dolar", date(2025, 1, 2), 950.12)).await;

        let reading = client.fetch(IndicatorCode::Dolar, Some(date(2025, 1, 2))).await.unwrap().unwrap();

        assert_eq!(reading.date, date(2025, 1, 2));
        assert_eq!(server.await.unwrap(), "GET /api/dolar/02-01-2025 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_empty_series_is_no_value() {
        let (client, _server) = serve_once("200 OK", r#"{"codigo":"bitcoin","serie":[]}"#.to_string()).await;
        assert!(client.fetch(IndicatorCode::Bitcoin, None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let (client, _server) = serve_once("404 Not Found", "{}".to_string()).await;
        assert!(matches!(
            client.fetch(IndicatorCode::Ivp, Some(date(1990, 1, 1))).await,
            Err(AppError::ExternalService(ServiceError::NotFound))
        ));

        let (client, _server) = serve_once("500 Internal Server Error", "{}".to_string()).await;
        assert!(matches!(
            client.fetch(IndicatorCode::Ivp, None).await,
            Err(AppError::ExternalService(ServiceError::Status(500)))
        ));
    }

    #[tokio::test]
    async fn test_unknown_code_never_reaches_the_network() {
        // Nothing listens here; a request would fail as unreachable.
        let client = client_for("http://127.0.0.1:9/api");

        match client.fetch_code("xyz", None).await {
            Err(AppError::Validation(Message::UnknownIndicator(code))) => assert_eq!(code, "xyz"),
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{}/api", addr));
        assert!(matches!(
            client.fetch(IndicatorCode::Utm, None).await,
            Err(AppError::ExternalService(ServiceError::Unreachable))
        ));
    }

    #[test_context(ClientTestContext)]
    #[tokio::test]
    async fn test_consult_and_save(ctx: &mut ClientTestContext) {
        let day = date(2025, 1, 1);
        let (client, _server) = serve_once("200 OK", series("dolar", day, 950.12344)).await;
        let service = IndicatorService::new(&ctx.db, &client);

        let consultation = service
            .consult(ctx.user_id, "dolar", Some(day), |reading| {
                assert_eq!(reading.code, IndicatorCode::Dolar);
                true
            })
            .await
            .unwrap()
            .unwrap();

        assert!(consultation.saved);
        let stored = EconomicIndicators::new(&ctx.db).get(IndicatorCode::Dolar, day).unwrap().unwrap();
        assert_eq!(stored.value, 950.1234);

        let audit = IndicatorQueries::new(&ctx.db).list_for_user(ctx.user_id, 10).unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].id, consultation.audit_id);
        assert!(audit[0].saved);
        assert_eq!(audit[0].value, 950.1234);
    }

    #[test_context(ClientTestContext)]
    #[tokio::test]
    async fn test_consult_without_saving(ctx: &mut ClientTestContext) {
        let today = Local::now().date_naive();
        let (client, _server) = serve_once("200 OK", series("euro", today, 1_030.0)).await;
        let service = IndicatorService::new(&ctx.db, &client);

        let consultation = service.consult(ctx.user_id, "EURO", None, |_| false).await.unwrap().unwrap();

        assert!(!consultation.saved);
        assert_eq!(EconomicIndicators::new(&ctx.db).stats().unwrap().total, 0);
        assert_eq!(ctx.audit_rows(), 1);
    }

    #[test_context(ClientTestContext)]
    #[tokio::test]
    async fn test_consult_without_data_leaves_no_audit(ctx: &mut ClientTestContext) {
        let (client, _server) = serve_once("200 OK", r#"{"serie":[]}"#.to_string()).await;
        let service = IndicatorService::new(&ctx.db, &client);

        let consultation = service.consult(ctx.user_id, "ipc", None, |_| true).await.unwrap();

        assert!(consultation.is_none());
        assert_eq!(ctx.audit_rows(), 0);
    }

    #[test_context(ClientTestContext)]
    #[tokio::test]
    async fn test_consult_rejects_unknown_code(ctx: &mut ClientTestContext) {
        let client = client_for("http://127.0.0.1:9/api");
        let service = IndicatorService::new(&ctx.db, &client);

        let result = service.consult(ctx.user_id, "xyz", None, |_| true).await;

        assert!(matches!(result, Err(AppError::Validation(Message::UnknownIndicator(_)))));
        assert_eq!(ctx.audit_rows(), 0);
    }
}
