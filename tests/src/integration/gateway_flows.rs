//! # Gateway Flows
//!
//! Storage (ib-01) → report gateway (ib-04), through the router and over a
//! real TCP listener.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tower::ServiceExt;

    use ib_01_usage_storage::demo::{seed_demo_dataset, DEMO_USAGE_ROWS};
    use ib_01_usage_storage::UsageStorageService;
    use ib_03_usage_report::SortScope;
    use ib_04_report_gateway::{build_router, GatewayConfig, ReportGatewayService, SharedStore};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn demo_store() -> SharedStore {
        let mut service = UsageStorageService::in_memory();
        seed_demo_dataset(&mut service).unwrap();
        Arc::new(service)
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn count(html: &str, needle: &str) -> usize {
        html.matches(needle).count()
    }

    // =============================================================================
    // ROUTER
    // =============================================================================

    #[tokio::test]
    async fn test_first_page_with_pager() {
        let router = build_router(demo_store(), &GatewayConfig::default());
        let (status, html) = get(router, "/admin/content/inline-blocks").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(count(&html, "<tr><td>"), 23);
        assert!(html.contains("<li class=\"pager__item is-active\">1</li>"));
        assert!(html.contains("href=\"/admin/content/inline-blocks?page=1\""));
        assert!(html.contains("Edit (Engineering)"));
    }

    #[tokio::test]
    async fn test_sorted_second_page_keeps_sort_in_links() {
        let router = build_router(demo_store(), &GatewayConfig::default());
        let (_, html) = get(
            router,
            "/admin/content/inline-blocks?page=1&order=Block%20Type&sort=desc",
        )
        .await;

        assert_eq!(count(&html, "<tr><td>"), 15);
        assert!(html.find("<td>Hero banner</td>").unwrap() < html.find("<td>Accordion</td>").unwrap());
        assert!(html.contains("?page=0&amp;order=Block%20Type&amp;sort=desc"));
        assert!(html.contains("aria-sort=\"descending\""));
    }

    #[tokio::test]
    async fn test_global_sort_scope_from_config() {
        let config = GatewayConfig::parse("[report]\nsort_scope = \"global\"\npage_size = 10\n").unwrap();
        assert_eq!(config.report.sort_scope, SortScope::Global);

        let router = build_router(demo_store(), &config);
        let (_, html) = get(router, "/admin/content/inline-blocks").await;

        // 8 accordion rows sort ahead of everything else
        assert_eq!(count(&html, "<td>Accordion</td>"), 8);
        assert_eq!(count(&html, "<td>Basic block</td>"), 2);
        assert!(html.contains("Last »"));
    }

    #[tokio::test]
    async fn test_custom_route() {
        let config = GatewayConfig::parse("[report]\nroute = \"/reports/blocks\"\n").unwrap();
        let router = build_router(demo_store(), &config);

        let (status, html) = get(router.clone(), "/reports/blocks").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("href=\"/reports/blocks?page=1\""));

        let (status, _) = get(router, "/admin/content/inline-blocks").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_and_metrics_after_report() {
        let router = build_router(demo_store(), &GatewayConfig::default());
        get(router.clone(), "/admin/content/inline-blocks").await;

        let (status, body) = get(router.clone(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["usage_records"], DEMO_USAGE_ROWS);

        let (status, body) = get(router, "/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("ib_report_requests_total{surface=\"web\"}"));
        assert!(body.contains("ib_resolution_failures_total"));
    }

    // =============================================================================
    // SERVICE OVER TCP
    // =============================================================================

    #[tokio::test]
    async fn test_service_serves_report_over_tcp() {
        let mut service = ReportGatewayService::new(GatewayConfig::default(), demo_store()).unwrap();
        let handle = service.shutdown_handle().unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move { service.serve(listener).await });

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(
                b"GET /admin/content/inline-blocks?page=9 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
            )
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("No blocks found"));

        handle.shutdown();
        server.await.unwrap().unwrap();
    }
}
