// LCU connection and request utilities
//
// The League client publishes a local HTTPS API; port and password come from
// the lockfile it writes while running.

use base64::{engine::general_purpose, Engine};
use std::path::PathBuf;
use std::time::Duration;

// Lockfile format: name:pid:port:password:protocol
const LOCKFILE_NAMES: [&str; 3] = ["lockfile", "LeagueClientUx.lockfile", "LeagueClient.lockfile"];

const DEFAULT_LEAGUE_DIRS: [&str; 3] = [
  "C:\\Riot Games\\League of Legends",
  "C:\\Program Files\\Riot Games\\League of Legends",
  "C:\\Program Files (x86)\\Riot Games\\League of Legends",
];

#[derive(Debug, Clone)]
pub struct LcuConnection {
  pub port: String,
  pub token: String,
}

/// Response snapshot so callers can inspect status and body after the
/// network call completed (mirrors how the LCU reports errors in bodies).
#[derive(Debug)]
pub struct LcuResponse {
  pub status: u16,
  pub body: String,
}

impl LcuResponse {
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }

  pub fn json(&self) -> Option<serde_json::Value> {
    serde_json::from_str(&self.body).ok()
  }
}

/// Build the shared HTTP client used for all LCU calls. The LCU serves a
/// self-signed certificate, so certificate validation must be disabled.
pub fn build_http_client() -> Result<reqwest::Client, String> {
  reqwest::Client::builder()
    .danger_accept_invalid_certs(true)
    .timeout(Duration::from_secs(5))
    .connect_timeout(Duration::from_secs(2))
    .pool_max_idle_per_host(2)
    .build()
    .map_err(|e| format!("Failed to create HTTP client: {}", e))
}

fn candidate_lockfile_paths() -> Vec<PathBuf> {
  let mut paths = Vec::new();

  // Env override takes priority (useful for non-standard installs).
  for var in ["LOL_LOCKFILE", "LOL_LOCKFILE_PATH"] {
    if let Ok(value) = std::env::var(var) {
      if !value.trim().is_empty() {
        paths.push(PathBuf::from(value));
      }
    }
  }

  for dir in DEFAULT_LEAGUE_DIRS {
    for name in LOCKFILE_NAMES {
      paths.push(PathBuf::from(dir).join(name));
    }
  }

  paths
}

/// Read port/token from the first readable lockfile.
pub fn read_connection() -> Result<LcuConnection, String> {
  for path in candidate_lockfile_paths() {
    let content = match std::fs::read_to_string(&path) {
      Ok(c) => c,
      Err(_) => continue,
    };

    let parts: Vec<&str> = content.trim().split(':').collect();
    if parts.len() < 5 {
      continue;
    }

    let port = parts[2].trim();
    let token = parts[3].trim();
    if port.is_empty() || token.is_empty() {
      continue;
    }

    return Ok(LcuConnection {
      port: port.to_string(),
      token: token.to_string(),
    });
  }

  Err("LCU lockfile not found. Is the League client running?".to_string())
}

/// Authenticated client bound to one lockfile read. Re-created per tick so a
/// client restart (new port/token) is picked up automatically.
pub struct LcuClient {
  http: reqwest::Client,
  connection: LcuConnection,
  auth_header: String,
}

impl LcuClient {
  pub fn connect(http: &reqwest::Client) -> Result<LcuClient, String> {
    let connection = read_connection()?;
    let auth = general_purpose::STANDARD.encode(format!("riot:{}", connection.token));
    Ok(LcuClient {
      http: http.clone(),
      connection,
      auth_header: format!("Basic {}", auth),
    })
  }

  fn url(&self, endpoint: &str) -> String {
    format!("https://127.0.0.1:{}{}", self.connection.port, endpoint)
  }

  /// Issue an authenticated request. `endpoint` starts with `/lol-...`.
  pub async fn request(
    &self,
    method: reqwest::Method,
    endpoint: &str,
    body: Option<&serde_json::Value>,
  ) -> Result<LcuResponse, String> {
    let mut builder = self
      .http
      .request(method.clone(), self.url(endpoint))
      .header("Authorization", &self.auth_header);

    if let Some(json_body) = body {
      builder = builder.json(json_body);
    }

    let response = builder
      .send()
      .await
      .map_err(|e| format!("LCU request {} {} failed: {}", method, endpoint, e))?;

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Ok(LcuResponse { status, body })
  }

  pub async fn get(&self, endpoint: &str) -> Result<LcuResponse, String> {
    self.request(reqwest::Method::GET, endpoint, None).await
  }

  pub async fn post(
    &self,
    endpoint: &str,
    body: Option<&serde_json::Value>,
  ) -> Result<LcuResponse, String> {
    self.request(reqwest::Method::POST, endpoint, body).await
  }

  pub async fn put(
    &self,
    endpoint: &str,
    body: Option<&serde_json::Value>,
  ) -> Result<LcuResponse, String> {
    self.request(reqwest::Method::PUT, endpoint, body).await
  }

  pub async fn patch(
    &self,
    endpoint: &str,
    body: Option<&serde_json::Value>,
  ) -> Result<LcuResponse, String> {
    self.request(reqwest::Method::PATCH, endpoint, body).await
  }

  pub async fn delete(&self, endpoint: &str) -> Result<LcuResponse, String> {
    self.request(reqwest::Method::DELETE, endpoint, None).await
  }
}
