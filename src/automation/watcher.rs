// The automation loop: one background thread, one tick per second
//
// Each tick runs auto-queue, ready-check accept, then the champ-select
// resolvers against a fresh session snapshot. Every external call is
// isolated; a failed call degrades that step to a no-op for the tick. The
// loop only exits when the run flag is cleared.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Instant;

use super::champ_select;
use super::queue;
use super::runes;
use super::spells;
use super::types::{
  current_config, AUTOMATION_RUNNING, LOOP_THREAD_ACTIVE, QUEUE_ACTION_INTERVAL, RUNES_APPLIED,
  TICK_INTERVAL,
};
use crate::commands::types::AutomationConfig;
use crate::lcu::{build_http_client, LcuClient};

/// Spawn the loop thread unless one is already alive. The thread clears its
/// guard on exit, so a stopped loop can be started again later.
pub fn spawn_automation_loop() {
  if LOOP_THREAD_ACTIVE.swap(true, Ordering::SeqCst) {
    return;
  }

  thread::spawn(|| {
    automation_loop();
    LOOP_THREAD_ACTIVE.store(false, Ordering::SeqCst);
  });
}

/// Whether this tick may run the rune synchronizer. Leaving the
/// finalization phase re-arms the once-per-entry gate.
pub fn runes_gate_allows(phase: &str) -> bool {
  if phase == "FINALIZATION" {
    !RUNES_APPLIED.load(Ordering::SeqCst)
  } else {
    RUNES_APPLIED.store(false, Ordering::SeqCst);
    false
  }
}

pub fn mark_runes_applied() {
  RUNES_APPLIED.store(true, Ordering::SeqCst);
}

fn automation_loop() {
  println!("[AUTO] Automation loop started");

  let rt = match tokio::runtime::Runtime::new() {
    Ok(rt) => rt,
    Err(e) => {
      eprintln!("[AUTO] Failed to create tokio runtime: {}", e);
      AUTOMATION_RUNNING.store(false, Ordering::SeqCst);
      return;
    }
  };
  let http = match build_http_client() {
    Ok(client) => client,
    Err(e) => {
      eprintln!("[AUTO] {}", e);
      AUTOMATION_RUNNING.store(false, Ordering::SeqCst);
      return;
    }
  };

  // Allow the first queue attempt immediately.
  let mut last_queue_action = Instant::now() - QUEUE_ACTION_INTERVAL;

  while AUTOMATION_RUNNING.load(Ordering::SeqCst) {
    let result = catch_unwind(AssertUnwindSafe(|| {
      if let Some(cfg) = current_config() {
        rt.block_on(run_tick(&http, &cfg, &mut last_queue_action));
      }
    }));

    if result.is_err() {
      eprintln!("[AUTO] Loop error: tick panicked, resuming");
      thread::sleep(TICK_INTERVAL);
    }

    thread::sleep(TICK_INTERVAL);
  }

  println!("[AUTO] Automation loop stopped");
}

async fn run_tick(
  http: &reqwest::Client,
  cfg: &AutomationConfig,
  last_queue_action: &mut Instant,
) {
  let client = match LcuClient::connect(http) {
    Ok(client) => client,
    Err(e) => {
      println!("[AUTO] {}", e);
      return;
    }
  };

  let flow_phase = queue::get_gameflow_phase(&client).await;

  if cfg.auto_queue && cfg.queue_id > 0 {
    // Only create lobbies / start search from idle or lobby phases, and at
    // most once per rate-limit window.
    let idle = matches!(flow_phase.as_deref(), None | Some("None") | Some("Lobby"));
    if idle && last_queue_action.elapsed() >= QUEUE_ACTION_INTERVAL {
      if queue::ensure_lobby(&client, cfg.queue_id).await {
        // Position preferences require an active lobby.
        queue::submit_role_preferences(&client, cfg).await;
        queue::ensure_matchmaking_searching(&client).await;
      }
      *last_queue_action = Instant::now();
    }
  } else {
    // Auto-queue off: still keep role preferences in sync when a lobby
    // exists, but never start a queue.
    queue::submit_role_preferences(&client, cfg).await;
  }

  queue::accept_ready_check(&client).await;

  let session = match client.get("/lol-champ-select/v1/session").await {
    Ok(res) if res.status == 200 => res.json(),
    _ => None,
  };
  let session = match session {
    Some(session) => session,
    None => return,
  };

  let phase = session
    .get("timer")
    .and_then(|t| t.get("phase"))
    .and_then(|p| p.as_str())
    .unwrap_or("")
    .to_string();
  let assigned = champ_select::assigned_role(&session);

  if let Some(ban_id) = champ_select::resolve_ban_target(cfg, &assigned) {
    champ_select::do_ban(&client, &session, ban_id).await;
  }

  let my_champs = champ_select::resolve_pick_preferences(cfg, &assigned);
  if !my_champs.is_empty() {
    champ_select::auto_pick(&client, &session, &my_champs).await;
  }

  // Runes are applied at most once per finalization entry; the gate resets
  // as soon as the session leaves the phase.
  if runes_gate_allows(&phase) {
    let role_for_runes = if assigned.is_empty() {
      cfg.primary_role_key()
    } else {
      assigned.clone()
    };
    if runes::apply_runes(&client, &session, cfg, &role_for_runes).await {
      mark_runes_applied();
    }
  }

  let spell_role_key = if assigned.is_empty() {
    cfg.primary_role_key()
  } else {
    assigned
  };
  spells::sync_summoner_spells(&client, &session, cfg, &spell_role_key).await;
}
