// HTTP surface consumed by the desktop UI: start/stop/health/champions

use axum::Json;
use serde::Serialize;
use std::sync::atomic::Ordering;

use crate::automation::types::{replace_config, AUTOMATION_LOCK, AUTOMATION_RUNNING};
use crate::automation::watcher::spawn_automation_loop;
use crate::commands::champion_data::load_champions_map;
use crate::commands::types::{AutomationConfig, ChampionInfo};
use crate::lcu::{build_http_client, LcuClient};

#[derive(Debug, Serialize)]
pub struct StartResponse {
  pub status: &'static str,
  pub config: AutomationConfig,
}

#[derive(Debug, Serialize)]
pub struct StopResponse {
  pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
  pub status: &'static str,
  pub running: bool,
}

/// Start the automation loop, or replace the configuration of a running
/// one. The configuration is swapped as a whole so the loop never observes
/// a partially updated state.
pub async fn start_automation(Json(config): Json<AutomationConfig>) -> Json<StartResponse> {
  let _guard = AUTOMATION_LOCK.lock().unwrap_or_else(|e| e.into_inner());

  replace_config(config.clone());
  let already_running = AUTOMATION_RUNNING.swap(true, Ordering::SeqCst);
  spawn_automation_loop();

  Json(StartResponse {
    status: if already_running { "updated" } else { "started" },
    config,
  })
}

/// Stop the loop; it exits at the top of its next tick. Idempotent.
pub async fn stop_automation() -> Json<StopResponse> {
  let _guard = AUTOMATION_LOCK.lock().unwrap_or_else(|e| e.into_inner());
  AUTOMATION_RUNNING.store(false, Ordering::SeqCst);
  Json(StopResponse { status: "stopped" })
}

pub async fn health() -> Json<HealthResponse> {
  Json(HealthResponse {
    status: "ok",
    running: AUTOMATION_RUNNING.load(Ordering::SeqCst),
  })
}

/// Owned champions for the UI pickers, sorted by name. Empty when the
/// League client is not running.
pub async fn get_champions() -> Json<Vec<ChampionInfo>> {
  let http = match build_http_client() {
    Ok(client) => client,
    Err(_) => return Json(Vec::new()),
  };
  let client = match LcuClient::connect(&http) {
    Ok(client) => client,
    Err(_) => return Json(Vec::new()),
  };

  let mut champions: Vec<ChampionInfo> = load_champions_map(&client).await.into_values().collect();
  champions.sort_by(|a, b| a.name.cmp(&b.name));
  Json(champions)
}
