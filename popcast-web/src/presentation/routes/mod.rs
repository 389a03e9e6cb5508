use axum::Router;

use super::AppState;
use super::app_error::AppError;

pub(crate) mod admin;
pub(crate) mod articles;
pub(crate) mod podcasts;
pub(crate) mod site;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(site::router())
        .nest("/article", articles::router(state.clone()))
        .nest("/podcast", podcasts::router(state.clone()))
        .nest("/admin", admin::router(state))
}

pub(crate) async fn not_found() -> AppError {
    AppError::NotFound
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use chrono::{Duration, Utc};
    use popcast_client::{ArticleStatus, LoginResponse};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::contact_service::fake::FakeMailer;
    use crate::data::fake::{FakeBackend, sample_article, sample_podcast};
    use crate::domain::contact::ALL_FIELDS_REQUIRED;
    use crate::presentation::http_handlers;
    use crate::presentation::test_support::{
        admin_cookie, admin_cookie_with_token, backend_token, backend_token_expiring_at, state,
    };

    const BOUNDARY: &str = "popcast-boundary";

    fn app(backend: &FakeBackend, mailer: &FakeMailer) -> (Router, String) {
        let state = state(backend, mailer);
        let cookie = admin_cookie(&state);
        (http_handlers::routes(state), cookie)
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).expect("request must build")
    }

    fn multipart_post(uri: &str, cookie: &str, fields: &[(&str, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::COOKIE, cookie)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("request must build")
    }

    fn json_post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request must build")
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must read");
        String::from_utf8(bytes.to_vec()).expect("body must be utf-8")
    }

    fn form_post(uri: &str, cookie: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::COOKIE, cookie)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("request must build")
    }

    fn set_cookie(response: &Response) -> &str {
        response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn healthz_answers_ok() {
        let (app, _) = app(&FakeBackend::new(), &FakeMailer::default());
        let response = app.oneshot(get("/healthz", None)).await.expect("must respond");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn admin_pages_redirect_anonymous_visitors_to_login() {
        let backend = FakeBackend::new();
        for uri in ["/admin", "/admin/dashboard", "/admin/articles", "/article/edit/a1"] {
            let (app, _) = app(&backend, &FakeMailer::default());
            let response = app.oneshot(get(uri, None)).await.expect("must respond");

            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
            assert_eq!(location(&response), "/admin/login", "{uri}");
        }
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn tampered_session_cookie_is_rejected() {
        let (app, cookie) = app(&FakeBackend::new(), &FakeMailer::default());
        let tampered = format!("{cookie}x");
        let response = app
            .oneshot(get("/admin/dashboard", Some(&tampered)))
            .await
            .expect("must respond");

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin/login");
    }

    #[tokio::test]
    async fn dashboard_greets_signed_in_admin() {
        let (app, cookie) = app(&FakeBackend::new(), &FakeMailer::default());
        let response = app
            .oneshot(get("/admin/dashboard", Some(&cookie)))
            .await
            .expect("must respond");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("rana"));
    }

    #[tokio::test]
    async fn empty_article_form_reports_two_errors_without_backend_call() {
        let backend = FakeBackend::new();
        let (app, cookie) = app(&backend, &FakeMailer::default());
        let request = multipart_post(
            "/admin/articles",
            &cookie,
            &[("title", ""), ("content", ""), ("status", "draft"), ("date", "")],
        );
        let response = app.oneshot(request).await.expect("must respond");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Title is required"));
        assert!(body.contains("Content is required"));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn anonymous_article_list_only_asks_for_published() {
        let backend = FakeBackend::new();
        let (app, _) = app(&backend, &FakeMailer::default());
        let response = app
            .oneshot(get("/article?status=draft&page=2", None))
            .await
            .expect("must respond");

        assert_eq!(response.status(), StatusCode::OK);
        let queries = backend
            .article_queries
            .lock()
            .expect("article_queries mutex poisoned")
            .clone();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].0.status, Some(ArticleStatus::Published));
        assert_eq!(queries[0].0.page, 2);
        assert_eq!(queries[0].1, None);
    }

    #[tokio::test]
    async fn admin_article_list_keeps_status_filter() {
        let backend = FakeBackend::new();
        let (app, cookie) = app(&backend, &FakeMailer::default());
        app.oneshot(get("/article?status=draft", Some(&cookie)))
            .await
            .expect("must respond");

        let queries = backend
            .article_queries
            .lock()
            .expect("article_queries mutex poisoned")
            .clone();
        assert_eq!(queries[0].0.status, Some(ArticleStatus::Draft));
        assert!(queries[0].1.is_some());
    }

    #[tokio::test]
    async fn drafts_are_hidden_from_anonymous_readers() {
        let backend =
            FakeBackend::new().with_articles(vec![sample_article("a1", ArticleStatus::Draft)]);

        let (anonymous, cookie) = app(&backend, &FakeMailer::default());
        let response = anonymous
            .oneshot(get("/article/a1", None))
            .await
            .expect("must respond");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let (admin, _) = app(&backend, &FakeMailer::default());
        let response = admin
            .oneshot(get("/article/a1", Some(&cookie)))
            .await
            .expect("must respond");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("مقال a1"));
    }

    #[tokio::test]
    async fn unknown_paths_render_not_found() {
        let (app, _) = app(&FakeBackend::new(), &FakeMailer::default());
        let response = app
            .oneshot(get("/no/such/page", None))
            .await
            .expect("must respond");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn login_sets_http_only_session_cookie() {
        let backend = FakeBackend::new().with_login(LoginResponse {
            token: backend_token(),
            id: "admin-1".to_string(),
            username: "rana".to_string(),
            is_super_admin: true,
        });
        let (app, _) = app(&backend, &FakeMailer::default());
        let request = Request::builder()
            .method("POST")
            .uri("/admin/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("username=rana&password=secret1"))
            .expect("request must build");
        let response = app.oneshot(request).await.expect("must respond");

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin/dashboard");
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        assert!(cookie.starts_with("popcast_session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
    }

    #[tokio::test]
    async fn failed_login_rerenders_form() {
        let backend = FakeBackend::new();
        let (app, _) = app(&backend, &FakeMailer::default());
        let request = Request::builder()
            .method("POST")
            .uri("/admin/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("username=rana&password=wrong"))
            .expect("request must build");
        let response = app.oneshot(request).await.expect("must respond");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert!(body_text(response).await.contains("Invalid username or password"));
    }

    #[tokio::test]
    async fn contact_requires_every_field() {
        let mailer = FakeMailer::default();
        let (app, _) = app(&FakeBackend::new(), &mailer);
        let request = json_post(
            "/api/contact",
            json!({ "name": "سارة", "email": "sara@example.com", "subject": "", "message": "" }),
        );
        let response = app.oneshot(request).await.expect("must respond");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value =
            serde_json::from_str(&body_text(response).await).expect("body must be json");
        assert_eq!(body["error"], ALL_FIELDS_REQUIRED);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn contact_reports_mail_failure() {
        let (app, _) = app(&FakeBackend::new(), &FakeMailer::failing());
        let request = json_post(
            "/api/contact",
            json!({
                "name": "سارة",
                "email": "sara@example.com",
                "subject": "استفسار",
                "message": "مرحبا"
            }),
        );
        let response = app.oneshot(request).await.expect("must respond");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value =
            serde_json::from_str(&body_text(response).await).expect("body must be json");
        assert_eq!(body["error"], "حدث خطأ أثناء إرسال الرسالة");
    }

    #[tokio::test]
    async fn media_upload_without_session_is_unauthorized_json() {
        let backend = FakeBackend::new();
        let (app, _) = app(&backend, &FakeMailer::default());
        let request = Request::builder()
            .method("POST")
            .uri("/admin/media")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(format!("--{BOUNDARY}--\r\n")))
            .expect("request must build");
        let response = app.oneshot(request).await.expect("must respond");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value =
            serde_json::from_str(&body_text(response).await).expect("body must be json");
        assert!(body["error"]["message"].is_string());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn refused_admin_action_shows_backend_message() {
        let backend = FakeBackend::new().rejecting(403, "Super admin access required");
        let (app, cookie) = app(&backend, &FakeMailer::default());
        let request = form_post(
            "/admin/manage-admins",
            &cookie,
            "username=nour&password=secret123",
        );
        let response = app.oneshot(request).await.expect("must respond");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::LOCATION).is_none());
        assert!(
            body_text(response)
                .await
                .contains("Super admin access required")
        );
        assert!(backend.calls().contains(&"register_admin".to_string()));
    }

    #[tokio::test]
    async fn backend_token_rejection_signs_the_admin_out() {
        let backend = FakeBackend::new().rejecting(401, "Invalid token");
        let (app, cookie) = app(&backend, &FakeMailer::default());
        let response = app
            .oneshot(get("/admin/manage-admins", Some(&cookie)))
            .await
            .expect("must respond");

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin/login");
        assert!(set_cookie(&response).starts_with("popcast_session=;"));
    }

    #[tokio::test]
    async fn expired_backend_token_leads_to_login_form_without_bounce() {
        let backend = FakeBackend::new();
        let state = state(&backend, &FakeMailer::default());
        let expired = backend_token_expiring_at((Utc::now() - Duration::minutes(5)).timestamp());
        let cookie = admin_cookie_with_token(&state, expired);

        let response = http_handlers::routes(state.clone())
            .oneshot(get("/admin/dashboard", Some(&cookie)))
            .await
            .expect("must respond");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin/login");
        assert!(set_cookie(&response).contains("Max-Age=0"));

        let response = http_handlers::routes(state)
            .oneshot(get("/admin/login", Some(&cookie)))
            .await
            .expect("must respond");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("name=\"username\""));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn podcast_description_is_escaped() {
        let mut podcast = sample_podcast("p1");
        podcast.description = Some("<script>alert(1)</script>\nالسطر الثاني".to_string());
        let backend = FakeBackend::new().with_podcasts(vec![podcast]);
        let (app, _) = app(&backend, &FakeMailer::default());

        let response = app
            .oneshot(get("/podcast/p1", None))
            .await
            .expect("must respond");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(!body.contains("<script>alert(1)</script>"));
        assert!(body.contains("alert(1)"));
        assert!(body.contains("<br/>السطر الثاني"));
    }
}
