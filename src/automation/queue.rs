// Lobby, matchmaking and ready-check plumbing

use serde_json::json;
use std::time::Duration;

use crate::commands::types::AutomationConfig;
use crate::lcu::LcuClient;

/// Current gameflow phase as a string ("None", "Lobby", "ChampSelect", ...);
/// None when the endpoint failed or returned something unexpected.
pub async fn get_gameflow_phase(client: &LcuClient) -> Option<String> {
  let res = client.get("/lol-gameflow/v1/gameflow-phase").await.ok()?;
  if res.status != 200 {
    return None;
  }
  res.json()?.as_str().map(|s| s.to_string())
}

/// Ensure a lobby with `queue_id` exists. An existing lobby on a different
/// queue is left and recreated.
pub async fn ensure_lobby(client: &LcuClient, queue_id: i64) -> bool {
  if let Ok(res) = client.get("/lol-lobby/v2/lobby").await {
    if res.status == 200 {
      let current_queue = res
        .json()
        .and_then(|lobby| lobby.get("gameConfig")?.get("queueId")?.as_i64());

      if current_queue == Some(queue_id) {
        return true;
      }

      let _ = client.delete("/lol-lobby/v2/lobby").await;
      // Give the client a moment to tear the old lobby down.
      tokio::time::sleep(Duration::from_millis(500)).await;
    }
  }

  let body = json!({ "queueId": queue_id });
  match client.post("/lol-lobby/v2/lobby", Some(&body)).await {
    Ok(res) if res.is_success() => {
      println!("[QUEUE] Lobby created queueId={}", queue_id);
      true
    }
    Ok(res) => {
      println!("[QUEUE] Failed to create lobby: {} {}", res.status, res.body);
      false
    }
    Err(e) => {
      println!("[QUEUE] Error creating lobby: {}", e);
      false
    }
  }
}

/// Push the configured role preferences to the current lobby. Requires an
/// active lobby; failures are the client's way of saying there is none.
pub async fn submit_role_preferences(client: &LcuClient, cfg: &AutomationConfig) {
  let mut body = serde_json::Map::new();
  if let Some(primary) = cfg.primary_role.as_deref().filter(|r| !r.trim().is_empty()) {
    body.insert("firstPreference".to_string(), json!(primary.to_uppercase()));
  }
  if let Some(secondary) = cfg
    .secondary_role
    .as_deref()
    .filter(|r| !r.trim().is_empty())
  {
    body.insert(
      "secondPreference".to_string(),
      json!(secondary.to_uppercase()),
    );
  }

  if body.is_empty() {
    return;
  }

  let _ = client
    .put(
      "/lol-lobby/v2/lobby/members/localMember/position-preferences",
      Some(&serde_json::Value::Object(body)),
    )
    .await;
}

/// Start matchmaking search unless it is already searching. Some client
/// versions do not expose the search-state endpoint; treat that as unknown
/// and start anyway.
pub async fn ensure_matchmaking_searching(client: &LcuClient) {
  if let Ok(res) = client
    .get("/lol-lobby/v2/lobby/matchmaking/search-state")
    .await
  {
    if res.status == 200 {
      let searching = res
        .json()
        .map(|state| state.get("searchState").and_then(|s| s.as_str()) == Some("Searching"))
        .unwrap_or(false);
      if searching {
        return;
      }
    }
  }

  match client
    .post("/lol-lobby/v2/lobby/matchmaking/search", None)
    .await
  {
    Ok(res) if res.status == 200 || res.status == 204 => {
      println!("[QUEUE] Matchmaking search started");
    }
    Ok(res) => {
      println!("[QUEUE] Failed to start search: {} {}", res.status, res.body);
    }
    Err(e) => {
      println!("[QUEUE] Error starting search: {}", e);
    }
  }
}

/// Accept a ready check that is in progress.
pub async fn accept_ready_check(client: &LcuClient) {
  let res = match client.get("/lol-matchmaking/v1/ready-check").await {
    Ok(res) => res,
    Err(_) => return,
  };
  if res.status != 200 {
    return;
  }

  let in_progress = res
    .json()
    .map(|rc| rc.get("state").and_then(|s| s.as_str()) == Some("InProgress"))
    .unwrap_or(false);
  if in_progress {
    let _ = client
      .post("/lol-matchmaking/v1/ready-check/accept", None)
      .await;
  }
}
