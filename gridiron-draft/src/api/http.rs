// REST implementation of DraftBackend over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{ApiError, DraftBackend, PickRequest, Recommendation};
use crate::config::ApiConfig;
use crate::draft::pick::{DraftPick, Player};

/// HTTP client for the draft backend.
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client rooted at `base_url`. A trailing slash is ignored.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(api: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(&api.base_url, api.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request, map transport errors and non-2xx statuses, and return
    /// the raw response body.
    async fn send(&self, url: &str, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(|source| {
            warn!(url, %source, "backend request failed");
            ApiError::Request {
                url: url.to_string(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, %status, "backend returned error status");
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| ApiError::Request {
            url: url.to_string(),
            source,
        })?;
        debug!(url, bytes = body.len(), "backend response");
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let body = self.send(&url, self.http.get(&url).query(query)).await?;
        decode(&url, &body)
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| {
        warn!(url, %source, "failed to decode backend response");
        ApiError::Decode {
            url: url.to_string(),
            source,
        }
    })
}

/// Decode a recommendation body, treating an empty body, `null`, and an
/// object without a player name as "no recommendation".
fn decode_recommendation(url: &str, body: &str) -> Result<Option<Recommendation>, ApiError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let rec: Option<Recommendation> = decode(url, body)?;
    Ok(rec.filter(Recommendation::is_actionable))
}

#[async_trait]
impl DraftBackend for HttpBackend {
    async fn available_players(&self) -> Result<Vec<Player>, ApiError> {
        self.get_json("available-players", &[]).await
    }

    async fn draft_board(&self) -> Result<Vec<DraftPick>, ApiError> {
        self.get_json("draft-board", &[]).await
    }

    async fn team_roster(&self, drafter: &str) -> Result<Vec<Player>, ApiError> {
        self.get_json("my-team", &[("drafter", drafter)]).await
    }

    async fn recommendation(&self) -> Result<Option<Recommendation>, ApiError> {
        let url = self.url("recommendation");
        let body = self.send(&url, self.http.get(&url)).await?;
        decode_recommendation(&url, &body)
    }

    async fn submit_pick(&self, pick: &PickRequest) -> Result<(), ApiError> {
        let url = self.url("draft-picks");
        debug!(
            drafter = %pick.drafter,
            pick_number = pick.pick_number,
            round = pick.round,
            player_id = %pick.player_id,
            "submitting pick"
        );
        self.send(&url, self.http.post(&url).json(pick)).await?;
        Ok(())
    }

    async fn reset_draft(&self) -> Result<(), ApiError> {
        let url = self.url("reset-draft");
        self.send(&url, self.http.delete(&url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::pick::PlayerId;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve exactly one HTTP request with a canned response. Returns the
    /// base URL and a receiver for the raw request text.
    async fn one_shot_server(status: u16, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];

            let header_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "client closed before sending headers");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .map(|v| v.trim().parse::<usize>().unwrap())
                .unwrap_or(0);
            while buf.len() < header_end + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let _ = tx.send(String::from_utf8_lossy(&buf).to_string());
        });

        (format!("http://{addr}"), rx)
    }

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let b = backend("http://localhost:8000/");
        assert_eq!(b.base_url(), "http://localhost:8000");
        assert_eq!(b.url("draft-board"), "http://localhost:8000/draft-board");
        assert_eq!(b.url("/draft-board"), "http://localhost:8000/draft-board");
    }

    #[test]
    fn base_url_path_prefix_is_kept() {
        let b = backend("https://draft.example.com/api");
        assert_eq!(
            b.url("available-players"),
            "https://draft.example.com/api/available-players"
        );
    }

    #[test]
    fn recommendation_body_variants() {
        let url = "http://x/recommendation";
        assert_eq!(decode_recommendation(url, "").unwrap(), None);
        assert_eq!(decode_recommendation(url, "null").unwrap(), None);
        assert_eq!(decode_recommendation(url, "{}").unwrap(), None);

        let rec = decode_recommendation(url, r#"{"name": "CeeDee Lamb", "position": "WR"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(rec.name.as_deref(), Some("CeeDee Lamb"));

        assert!(matches!(
            decode_recommendation(url, "<html>"),
            Err(ApiError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn fetches_available_players() {
        let (base, req_rx) = one_shot_server(
            200,
            r#"[{"id": 1, "name": "Bijan Robinson", "position": "RB", "team": "ATL", "projected_points": 280.5}]"#,
        )
        .await;

        let players = backend(&base).available_players().await.unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Bijan Robinson");

        let request = req_rx.await.unwrap();
        assert!(request.starts_with("GET /available-players "), "{request}");
    }

    #[tokio::test]
    async fn team_roster_encodes_drafter_query() {
        let (base, req_rx) = one_shot_server(200, "[]").await;

        let roster = backend(&base).team_roster("Team 2").await.unwrap();
        assert!(roster.is_empty());

        let request = req_rx.await.unwrap();
        assert!(request.starts_with("GET /my-team?drafter=Team+2 "), "{request}");
    }

    #[tokio::test]
    async fn submit_pick_posts_json_body() {
        let (base, req_rx) = one_shot_server(200, r#"{"ok": true}"#).await;

        let pick = PickRequest {
            player_id: PlayerId::Number(7),
            pick_number: 4,
            round: 1,
            drafter: "Team 4".into(),
        };
        backend(&base).submit_pick(&pick).await.unwrap();

        let request = req_rx.await.unwrap();
        assert!(request.starts_with("POST /draft-picks "), "{request}");
        let body = request.split("\r\n\r\n").nth(1).unwrap();
        let sent: PickRequest = serde_json::from_str(body).unwrap();
        assert_eq!(sent, pick);
    }

    #[tokio::test]
    async fn reset_uses_delete() {
        let (base, req_rx) = one_shot_server(200, "").await;
        backend(&base).reset_draft().await.unwrap();
        let request = req_rx.await.unwrap();
        assert!(request.starts_with("DELETE /reset-draft "), "{request}");
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let (base, _req_rx) = one_shot_server(500, r#"{"detail": "boom"}"#).await;
        let err = backend(&base).draft_board().await.unwrap_err();
        match err {
            ApiError::Status { status, url } => {
                assert_eq!(status.as_u16(), 500);
                assert!(url.ends_with("/draft-board"));
            }
            other => panic!("expected Status, got: {other}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let (base, _req_rx) = one_shot_server(200, r#"{"not": "a list"}"#).await;
        let err = backend(&base).draft_board().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }
}
