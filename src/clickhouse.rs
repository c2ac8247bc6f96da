use reqwest::{Client, Url};
use serde::{Deserialize, de::DeserializeOwned};

use crate::charts::ChartWindow;
use crate::error::StoreError;

/// HTTP client for ClickHouse.
///
/// SQL is posted as the request body. Parameters travel as `param_<name>`
/// query-string entries and are substituted by the server into
/// `{name:Type}` placeholders, so no value is ever spliced into SQL text.
#[derive(Clone, Debug)]
pub struct ClickHouseClient {
    client: Client,
    endpoint: Url,
    user: String,
    password: String,
    database: String,
}

#[derive(Deserialize)]
struct JsonResponse<T> {
    data: Vec<T>,
}

impl ClickHouseClient {
    pub fn new(
        endpoint: &str,
        user: &str,
        password: &str,
        database: &str,
    ) -> Result<Self, StoreError> {
        let endpoint = Url::parse(endpoint).map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            client: Client::new(),
            endpoint,
            user: user.to_owned(),
            password: password.to_owned(),
            database: database.to_owned(),
        })
    }

    /// Run a SELECT and decode the rows of its `data` array.
    pub async fn query<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .client
            .post(self.request_url(params))
            .basic_auth(&self.user, Some(&self.password))
            .body(sql.to_owned())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::ClickHouse { status, body });
        }

        let body = response.bytes().await?;
        let parsed: JsonResponse<T> = serde_json::from_slice(&body)?;
        Ok(parsed.data)
    }

    fn request_url(&self, params: &[(&str, String)]) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut qs = url.query_pairs_mut();
            qs.append_pair("database", &self.database);
            qs.append_pair("default_format", "JSON");
            // counts are UInt64, which JSON output quotes unless told otherwise
            qs.append_pair("output_format_json_quote_64bit_integers", "0");
            for (name, value) in params {
                qs.append_pair(&format!("param_{name}"), value);
            }
        }
        url
    }
}

/// Named parameters for the chart queries, matching `{url:String}` and
/// `{interval:Int64}`.
pub fn window_params(window: &ChartWindow) -> [(&'static str, String); 2] {
    [
        ("url", window.url.clone()),
        ("interval", window.interval.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::TimestampValue;
    use crate::clickhouse_queries::*;

    /// Placeholder names in order of first appearance.
    fn placeholders(sql: &str) -> Vec<String> {
        let mut names = Vec::new();
        let mut rest = sql;
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else { break };
            if let Some((name, _ty)) = after[..end].split_once(':') {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
            rest = &after[end + 1..];
        }
        names
    }

    #[test]
    fn every_query_binds_exactly_the_window_params() {
        let bound: Vec<String> = window_params(&ChartWindow::new("a.com", 24))
            .iter()
            .map(|(name, _)| name.to_string())
            .collect();

        for sql in [
            SELECT_FAILURES,
            SELECT_RESPONSE_TIME,
            SELECT_FAILURES_BY_TYPES,
            SELECT_HEATMAP,
        ] {
            assert_eq!(placeholders(sql), bound, "placeholder mismatch in {sql}");
        }
    }

    #[test]
    fn placeholder_types_match_param_values() {
        for sql in [
            SELECT_FAILURES,
            SELECT_RESPONSE_TIME,
            SELECT_FAILURES_BY_TYPES,
            SELECT_HEATMAP,
        ] {
            assert!(sql.contains("{url:String}"));
            assert!(sql.contains("{interval:Int64}"));
        }
    }

    #[test]
    fn heatmap_zero_fills_even_when_joins_use_nulls() {
        assert!(SELECT_HEATMAP.contains("toInt64(ifNull(failures.cnt, 0)) AS value"));
        assert!(!SELECT_HEATMAP.contains("toInt64(failures.cnt)"));
    }

    #[test]
    fn window_params_carry_prefix_and_interval() {
        let params = window_params(&ChartWindow::new("a.com/x", -3));
        assert_eq!(params[0], ("url", "a.com/x".to_string()));
        assert_eq!(params[1], ("interval", "-3".to_string()));
    }

    #[test]
    fn request_url_encodes_params() {
        let client =
            ClickHouseClient::new("http://localhost:8123", "default", "", "uptime").unwrap();
        let url = client.request_url(&window_params(&ChartWindow::new("a.com/x?y", 12)));
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(pairs.contains(&("database".to_string(), "uptime".to_string())));
        assert!(pairs.contains(&("default_format".to_string(), "JSON".to_string())));
        assert!(pairs.contains(&("param_url".to_string(), "a.com/x?y".to_string())));
        assert!(pairs.contains(&("param_interval".to_string(), "12".to_string())));
    }

    #[test]
    fn rejects_unparseable_endpoint() {
        let err = ClickHouseClient::new("not a url", "default", "", "default").unwrap_err();
        assert!(matches!(err, StoreError::InvalidUrl(_)));
    }

    /// Serves `/ok` with one data row and `/bad` with a ClickHouse-style 400.
    async fn stub_server() -> String {
        use axum::{Router, http::StatusCode, routing::post};

        let app = Router::new()
            .route(
                "/ok",
                post(|| async {
                    r#"{"meta":[],"data":[{"bucket":"2026-01-01 00:00:00","value":1}],"rows":1}"#
                }),
            )
            .route(
                "/bad",
                post(|| async { (StatusCode::BAD_REQUEST, "Code: 62. Syntax error") }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn query_decodes_data_rows() {
        let base = stub_server().await;
        let client =
            ClickHouseClient::new(&format!("{base}/ok"), "default", "", "default").unwrap();
        let window = ChartWindow::new("a.com", 24);

        let rows: Vec<TimestampValue> = client
            .query(SELECT_FAILURES, &window_params(&window))
            .await
            .unwrap();
        assert_eq!(
            rows,
            vec![TimestampValue {
                bucket: "2026-01-01 00:00:00".to_string(),
                value: 1.0
            }]
        );
    }

    #[tokio::test]
    async fn query_surfaces_server_errors() {
        let base = stub_server().await;
        let client =
            ClickHouseClient::new(&format!("{base}/bad"), "default", "", "default").unwrap();
        let window = ChartWindow::new("a.com", 24);

        let err = client
            .query::<TimestampValue>(SELECT_FAILURES, &window_params(&window))
            .await
            .unwrap_err();
        match err {
            StoreError::ClickHouse { status, body } => {
                assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
                assert!(body.contains("Syntax error"));
            }
            other => panic!("expected ClickHouse error, got {other}"),
        }
    }

    #[test]
    fn decodes_json_rows() {
        let body = r#"{"meta":[],"data":[{"critical":1,"warning":2,"resolved":3}],"rows":1}"#;
        let parsed: JsonResponse<crate::charts::FailuresByTypes> =
            serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].critical, 1);
        assert_eq!(parsed.data[0].resolved, 3);
    }
}
