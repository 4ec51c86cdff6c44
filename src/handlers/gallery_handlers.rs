//! `GET /` — the gallery page.
//!
//! A store failure never surfaces as an error page: it is logged and the page
//! renders with no images.

use crate::{
    errors::AppError, models::image::ImageRecord, services::gallery_service::GalleryService,
};
use askama::Template;
use axum::{extract::State, response::Html};
use tracing::error;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub images: Vec<ImageRecord>,
}

/// `GET /`
pub async fn index(State(service): State<GalleryService>) -> Result<Html<String>, AppError> {
    let images = match service.list_images().await {
        Ok(images) => images,
        Err(err) => {
            error!(bucket = %service.bucket, error = %err, "error loading images");
            Vec::new()
        }
    };

    render_or_fallback(IndexTemplate { images }, || IndexTemplate { images: Vec::new() })
}

/// Render `page`, or log and render `fallback()` so the route still answers
/// 200. Only a failure of the fallback itself becomes a 500.
fn render_or_fallback<T: Template>(
    page: T,
    fallback: impl FnOnce() -> T,
) -> Result<Html<String>, AppError> {
    match page.render() {
        Ok(html) => Ok(Html(html)),
        Err(err) => {
            error!(error = %err, "error rendering gallery page");
            Ok(Html(fallback().render()?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::render_or_fallback;
    use askama::Template;
    use crate::{
        routes::routes::routes, services::gallery_service::GalleryService,
        store::memory::MemoryStore,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use std::sync::Arc;

    const BUCKET: &str = "testing1-bucket01";

    fn server(store: Arc<MemoryStore>) -> TestServer {
        let app = routes().with_state(GalleryService::new(store, BUCKET));
        TestServer::new(app).unwrap()
    }

    fn entries(page: &str) -> usize {
        page.matches(r#"class="gallery-item""#).count()
    }

    /// Displays as an error, making any template that prints it fail.
    struct Unprintable;

    impl std::fmt::Display for Unprintable {
        fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            Err(std::fmt::Error)
        }
    }

    #[derive(Template)]
    #[template(
        source = "<ul>{% for item in items %}<li>{{ item }}</li>{% endfor %}</ul>",
        ext = "html"
    )]
    struct ListTemplate {
        items: Vec<Unprintable>,
    }

    #[test]
    fn render_failure_falls_back_to_empty_page() {
        let html = render_or_fallback(
            ListTemplate {
                items: vec![Unprintable],
            },
            || ListTemplate { items: Vec::new() },
        )
        .unwrap();

        assert_eq!(html.0, "<ul></ul>");
    }

    #[test]
    fn failing_fallback_is_an_error() {
        let err = render_or_fallback(
            ListTemplate {
                items: vec![Unprintable],
            },
            || ListTemplate {
                items: vec![Unprintable],
            },
        )
        .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn renders_one_entry_per_object() {
        let store = Arc::new(MemoryStore::new());
        for key in ["1_a.png", "2_b.jpg", "3_c.gif"] {
            store.insert(BUCKET, key, b"data", "image/png").await;
        }
        let server = server(store);

        let response = server.get("/").await;

        response.assert_status(StatusCode::OK);
        let page = response.text();
        assert_eq!(entries(&page), 3);
        for key in ["1_a.png", "2_b.jpg", "3_c.gif"] {
            assert!(page.contains(key));
        }
        assert_eq!(page.matches("X-Amz-Expires=3600").count(), 6);
    }

    #[tokio::test]
    async fn empty_bucket_renders_empty_gallery() {
        let server = server(Arc::new(MemoryStore::new()));

        let response = server.get("/").await;

        response.assert_status(StatusCode::OK);
        let page = response.text();
        assert_eq!(entries(&page), 0);
        assert!(page.contains("No images yet."));
    }

    #[tokio::test]
    async fn enumeration_failure_still_renders_page() {
        let store = MemoryStore::new().failing_list();
        store.insert(BUCKET, "1_a.png", b"data", "image/png").await;
        let server = server(Arc::new(store));

        let response = server.get("/").await;

        response.assert_status(StatusCode::OK);
        let page = response.text();
        assert_eq!(entries(&page), 0);
        assert!(page.contains(r#"name="image""#));
    }

    #[tokio::test]
    async fn signing_failure_still_renders_page() {
        let store = MemoryStore::new().failing_sign();
        store.insert(BUCKET, "1_a.png", b"data", "image/png").await;
        let server = server(Arc::new(store));

        let response = server.get("/").await;

        response.assert_status(StatusCode::OK);
        assert_eq!(entries(&response.text()), 0);
    }

    #[tokio::test]
    async fn object_names_are_html_escaped() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert(BUCKET, "1_<script>.png", b"data", "image/png")
            .await;
        let server = server(store);

        let page = server.get("/").await.text();

        assert_eq!(entries(&page), 1);
        assert!(!page.contains("1_<script>.png"));
        assert!(page.contains("1_&lt;script&gt;.png"));
    }
}
