//! HTTP implementation of the student store.
//!
//! Endpoints, relative to the configured base URL:
//! `GET /list`, `POST /create`, `PUT /update`, `DELETE /delete?id=N`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::instrument;

use classbook_core::error::StoreError;
use classbook_core::model::Student;
use classbook_core::traits::StudentStore;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Student store reached over HTTP.
#[derive(Debug)]
pub struct HttpStudentStore {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpStudentStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self, StoreError> {
        let base = if base_url.trim().is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url.trim().trim_end_matches('/')
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| StoreError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base.to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    fn transport_error(&self, e: reqwest::Error) -> StoreError {
        if e.is_timeout() {
            StoreError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            StoreError::Network(format!("student store not reachable at {}", self.base_url))
        } else {
            StoreError::Network(e.to_string())
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(response)
    }
}

#[derive(Serialize)]
struct CreateBody<'a> {
    name: &'a str,
    average: f64,
}

#[derive(Serialize)]
struct UpdateBody<'a> {
    id: i64,
    name: &'a str,
    average: f64,
}

#[async_trait]
impl StudentStore for HttpStudentStore {
    fn name(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self))]
    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        let response = self.send(self.client.get(self.url("list"))).await?;
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let students: Vec<Student> =
            serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))?;
        tracing::debug!(count = students.len(), "listed students");
        Ok(students)
    }

    #[instrument(skip(self))]
    async fn create_student(&self, name: &str, average: f64) -> Result<(), StoreError> {
        self.send(
            self.client
                .post(self.url("create"))
                .json(&CreateBody { name, average }),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_student(&self, id: i64, name: &str, average: f64) -> Result<(), StoreError> {
        self.send(
            self.client
                .put(self.url("update"))
                .json(&UpdateBody { id, name, average }),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_student(&self, id: i64) -> Result<(), StoreError> {
        self.send(self.client.delete(format!("{}?id={id}", self.url("delete"))))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn lists_students_in_store_order() {
        let server = MockServer::start().await;

        let body = serde_json::json!([
            {"id": 3, "name": "Cy", "average": 7.25},
            {"id": 1, "name": "Ana", "average": 12.5}
        ]);
        Mock::given(method("GET"))
            .and(path("/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let store = HttpStudentStore::new(&server.uri()).unwrap();
        let students = store.list_students().await.unwrap();
        assert_eq!(
            students,
            vec![Student::new(3, "Cy", 7.25), Student::new(1, "Ana", 12.5)]
        );
    }

    #[tokio::test]
    async fn lists_legacy_backend_rows() {
        let server = MockServer::start().await;

        let body = serde_json::json!([{"numEt": "2", "nom": "Bo", "moyenne": "4.00"}]);
        Mock::given(method("GET"))
            .and(path("/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let store = HttpStudentStore::new(&server.uri()).unwrap();
        let students = store.list_students().await.unwrap();
        assert_eq!(students, vec![Student::new(2, "Bo", 4.0)]);
    }

    #[tokio::test]
    async fn undecodable_listing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/list"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let store = HttpStudentStore::new(&server.uri()).unwrap();
        let err = store.list_students().await.unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn server_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/list"))
            .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
            .mount(&server)
            .await;

        let store = HttpStudentStore::new(&server.uri()).unwrap();
        let err = store.list_students().await.unwrap_err();
        match err {
            StoreError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "database down");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_posts_name_and_average() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/create"))
            .and(body_json(serde_json::json!({"name": "Ana", "average": 12.5})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let store = HttpStudentStore::new(&server.uri()).unwrap();
        store.create_student("Ana", 12.5).await.unwrap();
    }

    #[tokio::test]
    async fn update_puts_full_record() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/update"))
            .and(body_json(
                serde_json::json!({"id": 2, "name": "Bo", "average": 6.0}),
            ))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let store = HttpStudentStore::new(&format!("{}/", server.uri())).unwrap();
        store.update_student(2, "Bo", 6.0).await.unwrap();
    }

    #[tokio::test]
    async fn delete_passes_id_in_query() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/delete"))
            .and(query_param("id", "2"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let store = HttpStudentStore::new(&server.uri()).unwrap();
        store.delete_student(2).await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_store() {
        let store = HttpStudentStore::new("http://127.0.0.1:1").unwrap();
        let err = store.list_students().await.unwrap_err();
        assert!(err.is_transport(), "got {err:?}");
    }

    #[tokio::test]
    async fn slow_store_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/list"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([]))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let store = HttpStudentStore::with_timeout(&server.uri(), 1).unwrap();
        let err = store.list_students().await.unwrap_err();
        assert!(matches!(err, StoreError::Timeout(1)), "got {err:?}");
    }

    #[test]
    fn empty_base_url_falls_back_to_default() {
        let store = HttpStudentStore::new("  ").unwrap();
        assert_eq!(store.base_url(), DEFAULT_BASE_URL);
        assert_eq!(store.url("list"), "http://localhost:8000/list");
    }
}
