// Champion select session helpers and the ban/pick resolvers
//
// Everything that reads the session snapshot is pure over the JSON value;
// only the submit paths talk to the client. Both resolvers run every tick;
// the client rejecting completed actions makes resubmission harmless.

use serde_json::{json, Value};
use std::collections::HashSet;

use super::types::{last_ban_skip, set_last_ban_skip};
use crate::commands::champion_data::get_champion_name_by_id;
use crate::commands::types::AutomationConfig;
use crate::lcu::LcuClient;

pub fn local_cell_id(session: &Value) -> Option<i64> {
  session.get("localPlayerCellId").and_then(|v| v.as_i64())
}

/// Assigned position of the local player, uppercased; empty when the queue
/// has no role assignment (blind pick, ARAM).
pub fn assigned_role(session: &Value) -> String {
  let my_cell = match local_cell_id(session) {
    Some(cell) => cell,
    None => return String::new(),
  };

  if let Some(team) = session.get("myTeam").and_then(|v| v.as_array()) {
    for player in team {
      if player.get("cellId").and_then(|v| v.as_i64()) == Some(my_cell) {
        return player
          .get("assignedPosition")
          .and_then(|v| v.as_str())
          .unwrap_or("")
          .to_uppercase();
      }
    }
  }
  String::new()
}

/// Committed champion of the local player (0 = none yet).
pub fn local_champion_id(session: &Value) -> i64 {
  let my_cell = match local_cell_id(session) {
    Some(cell) => cell,
    None => return 0,
  };

  if let Some(team) = session.get("myTeam").and_then(|v| v.as_array()) {
    for player in team {
      if player.get("cellId").and_then(|v| v.as_i64()) == Some(my_cell) {
        return player.get("championId").and_then(|v| v.as_i64()).unwrap_or(0);
      }
    }
  }
  0
}

pub fn is_banned(session: &Value, champ_id: i64) -> bool {
  if champ_id <= 0 {
    return false;
  }
  let bans = match session.get("bans") {
    Some(b) => b,
    None => return false,
  };

  for key in ["myTeamBans", "theirTeamBans"] {
    if let Some(list) = bans.get(key).and_then(|v| v.as_array()) {
      if list.iter().any(|v| v.as_i64() == Some(champ_id)) {
        return true;
      }
    }
  }
  false
}

pub fn is_picked(session: &Value, champ_id: i64) -> bool {
  if champ_id == 0 {
    return false;
  }

  for team_key in ["myTeam", "theirTeam"] {
    if let Some(team) = session.get(team_key).and_then(|v| v.as_array()) {
      for player in team {
        let picked = player.get("championId").and_then(|v| v.as_i64()).unwrap_or(0);
        if picked == champ_id {
          return true;
        }
      }
    }
  }
  false
}

/// True when a teammate has committed or declared intent for the champion.
pub fn is_teammate_showing(session: &Value, champ_id: i64) -> bool {
  if champ_id == 0 {
    return false;
  }

  if let Some(team) = session.get("myTeam").and_then(|v| v.as_array()) {
    for player in team {
      let shown = player.get("championId").and_then(|v| v.as_i64()).unwrap_or(0);
      if shown == champ_id {
        return true;
      }
      let intent = player
        .get("championPickIntent")
        .and_then(|v| v.as_i64())
        .unwrap_or(0);
      if intent == champ_id {
        return true;
      }
    }
  }
  false
}

/// First open, uncompleted action of the given type owned by the local cell.
pub fn find_open_action(session: &Value, action_type: &str) -> Option<i64> {
  let my_cell = local_cell_id(session)?;

  for group in session.get("actions").and_then(|v| v.as_array())? {
    let actions = match group.as_array() {
      Some(a) => a,
      None => continue,
    };
    for action in actions {
      if action.get("type").and_then(|v| v.as_str()) != Some(action_type) {
        continue;
      }
      if action.get("actorCellId").and_then(|v| v.as_i64()) != Some(my_cell) {
        continue;
      }
      if action.get("completed").and_then(|v| v.as_bool()).unwrap_or(false) {
        continue;
      }
      return action.get("id").and_then(|v| v.as_i64());
    }
  }
  None
}

/// Ban target for the assigned role; the primary-role entry covers queues
/// that assign no role.
pub fn resolve_ban_target(cfg: &AutomationConfig, assigned: &str) -> Option<i64> {
  let mut ban_id = if !assigned.is_empty() {
    cfg.role_bans.get(assigned).copied().filter(|id| *id > 0)
  } else {
    None
  };
  if ban_id.is_none() && assigned.is_empty() {
    ban_id = cfg
      .role_bans
      .get(&cfg.primary_role_key())
      .copied()
      .filter(|id| *id > 0);
  }
  ban_id
}

/// Ordered pick preferences for the assigned role, with the same
/// primary-role fallback as the ban target.
pub fn resolve_pick_preferences(cfg: &AutomationConfig, assigned: &str) -> Vec<i64> {
  let mut champs = cfg.role_champions.get(assigned).cloned().unwrap_or_default();
  if champs.is_empty() && assigned.is_empty() {
    champs = cfg
      .role_champions
      .get(&cfg.primary_role_key())
      .cloned()
      .unwrap_or_default();
  }
  champs
}

/// What the ban resolver decided for this tick, before any network call.
#[derive(Debug, Clone, PartialEq)]
pub enum BanPlan {
  /// No open ban action for the local player.
  NoAction,
  /// A teammate is showing the target; `announce` is true only the first
  /// tick this (action, champion) pair is seen.
  Skip { key: (i64, i64), announce: bool },
  Submit { action_id: i64 },
}

pub fn plan_ban(session: &Value, champ_id: i64, last_skip: Option<(i64, i64)>) -> BanPlan {
  let action_id = match find_open_action(session, "ban") {
    Some(id) => id,
    None => return BanPlan::NoAction,
  };

  if is_teammate_showing(session, champ_id) {
    let key = (action_id, champ_id);
    return BanPlan::Skip {
      key,
      announce: last_skip != Some(key),
    };
  }

  BanPlan::Submit { action_id }
}

/// Try to ban `champ_id` if the local ban action is open. Teammate intent on
/// the target skips the ban (logged once per action/champion pair); the
/// condition is rechecked every tick in case the intent changes.
pub async fn do_ban(client: &LcuClient, session: &Value, champ_id: i64) {
  match plan_ban(session, champ_id, last_ban_skip()) {
    BanPlan::NoAction => {}
    BanPlan::Skip { key, announce } => {
      if announce {
        let champ_name = get_champion_name_by_id(client, champ_id)
          .await
          .unwrap_or_else(|| champ_id.to_string());
        println!(
          "[BAN] Skipping ban for {} ({}) because a teammate is showing it",
          champ_name, champ_id
        );
        set_last_ban_skip(Some(key));
      }
    }
    BanPlan::Submit { action_id } => {
      set_last_ban_skip(None);
      let body = json!({ "championId": champ_id, "completed": true });
      let endpoint = format!("/lol-champ-select/v1/session/actions/{}", action_id);
      match client.patch(&endpoint, Some(&body)).await {
        Ok(res) if res.is_success() => {}
        Ok(res) => println!(
          "[BAN] Failed to ban championId={}: {} {}",
          champ_id, res.status, res.body
        ),
        Err(e) => println!("[BAN] Failed to ban championId={}: {}", champ_id, e),
      }
    }
  }
}

/// Outcome of one pick attempt for this tick.
#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
  /// The preference list was empty (after dropping invalid ids).
  NoPreference,
  /// Every preferred champion was banned, taken, or not pickable.
  AllUnavailable { attempted: Vec<i64> },
  /// No open pick action for the local player.
  NoPickAvailable,
  /// Every remaining candidate was rejected by the client.
  PickFailed {
    attempted: Vec<i64>,
    last_error: Option<String>,
  },
  Picked { champion: i64 },
}

/// Champion ids the player may currently pick. None when the endpoint is
/// unavailable (not in champ select yet); callers then skip that filter.
pub async fn get_pickable_champion_ids(client: &LcuClient) -> Option<HashSet<i64>> {
  let res = match client.get("/lol-champ-select/v1/pickable-champion-ids").await {
    Ok(res) => res,
    Err(e) => {
      println!("[AUTO-PICK] Error fetching pickable champion ids: {}", e);
      return None;
    }
  };
  if res.status != 200 {
    return None;
  }

  let ids = res.json()?;
  let list = ids.as_array()?;

  let mut pickable = HashSet::new();
  for id in list {
    if let Some(cid) = id.as_i64() {
      if cid > 0 {
        pickable.insert(cid);
      }
    }
  }
  Some(pickable)
}

/// Keep candidates in user order, dropping unpickable / banned / taken ids.
pub fn filter_pick_candidates(
  session: &Value,
  preferred: &[i64],
  pickable: Option<&HashSet<i64>>,
) -> Vec<i64> {
  preferred
    .iter()
    .copied()
    .filter(|cid| *cid > 0)
    .filter(|cid| pickable.map_or(true, |set| set.contains(cid)))
    .filter(|cid| !is_banned(session, *cid) && !is_picked(session, *cid))
    .collect()
}

/// Try the preferred champions strictly in order; the first one the client
/// accepts wins.
pub async fn auto_pick(client: &LcuClient, session: &Value, preferred: &[i64]) -> PickOutcome {
  let valid_ids: Vec<i64> = preferred.iter().copied().filter(|cid| *cid > 0).collect();
  if valid_ids.is_empty() {
    return PickOutcome::NoPreference;
  }

  let pickable = get_pickable_champion_ids(client).await;
  let candidates = filter_pick_candidates(session, &valid_ids, pickable.as_ref());

  if candidates.is_empty() {
    println!(
      "[AUTO-PICK] No pickable preferred champions. preferred={:?}",
      valid_ids
    );
    return PickOutcome::AllUnavailable { attempted: valid_ids };
  }

  let action_id = match find_open_action(session, "pick") {
    Some(id) => id,
    None => return PickOutcome::NoPickAvailable,
  };

  let endpoint = format!("/lol-champ-select/v1/session/actions/{}", action_id);
  let mut last_error: Option<String> = None;

  for champ_to_pick in &candidates {
    println!("[AUTO-PICK] Picking champion {}", champ_to_pick);
    let body = json!({ "championId": champ_to_pick, "completed": true });
    match client.patch(&endpoint, Some(&body)).await {
      Ok(res) if res.status == 200 || res.status == 204 => {
        return PickOutcome::Picked {
          champion: *champ_to_pick,
        };
      }
      Ok(res) => {
        println!(
          "[AUTO-PICK] Pick failed for {}: {} {}",
          champ_to_pick, res.status, res.body
        );
        last_error = Some(format!("{} {}", res.status, res.body));
      }
      Err(e) => {
        println!("[AUTO-PICK] Pick error for {}: {}", champ_to_pick, e);
        last_error = Some(e);
      }
    }
  }

  PickOutcome::PickFailed {
    attempted: candidates,
    last_error,
  }
}
