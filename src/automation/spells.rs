// Layered summoner spell resolution
//
// Three layers merged per slot: champion-specific custom entry, then the
// per-role default, then the global default. A layer that mentions a slot
// owns it. Even when the mentioned value is null ("no spell here"), lower
// layers must not fill it back in.

use serde_json::{json, Value};

use super::champ_select::local_cell_id;
use crate::commands::types::AutomationConfig;
use crate::lcu::LcuClient;

pub fn normalize_spell_id(value: &Value) -> Option<i64> {
  let id = super::rune_data::coerce_i64(value)?;
  if id > 0 {
    Some(id)
  } else {
    None
  }
}

/// Extracted spell pair: (slot1 present, slot1 id, slot2 present, slot2 id).
/// Supported entry shapes: `{"spell1Id": .., "spell2Id": ..}` (with legacy
/// `spell1`/`spell2` key spellings) and a `[id, id]` pair.
pub fn extract_spell_pair(entry: Option<&Value>) -> (bool, Option<i64>, bool, Option<i64>) {
  let mut has_s1 = false;
  let mut has_s2 = false;
  let mut s1: Option<i64> = None;
  let mut s2: Option<i64> = None;

  let entry = match entry {
    Some(e) => e,
    None => return (false, None, false, None),
  };

  if let Some(map) = entry.as_object() {
    if map.contains_key("spell1Id") || map.contains_key("spell1") {
      has_s1 = true;
    }
    if map.contains_key("spell2Id") || map.contains_key("spell2") {
      has_s2 = true;
    }

    if let Some(value) = map.get("spell1Id") {
      s1 = normalize_spell_id(value);
    } else if let Some(value) = map.get("spell1") {
      s1 = normalize_spell_id(value);
    }

    if let Some(value) = map.get("spell2Id") {
      s2 = normalize_spell_id(value);
    } else if let Some(value) = map.get("spell2") {
      s2 = normalize_spell_id(value);
    }
  } else if let Some(list) = entry.as_array() {
    if list.len() >= 2 {
      has_s1 = true;
      has_s2 = true;
      s1 = normalize_spell_id(&list[0]);
      s2 = normalize_spell_id(&list[1]);
    }
  }

  (has_s1, s1, has_s2, s2)
}

/// Merge the override layers for `role_key` and champion into the final
/// spell pair. `champ_id <= 0` disables the custom layer only.
pub fn resolve_spell_pair(
  cfg: &AutomationConfig,
  role_key: &str,
  champ_id: i64,
) -> (Option<i64>, Option<i64>) {
  let custom_entry = if champ_id > 0 {
    cfg
      .custom_summoner_spells
      .get(role_key)
      .and_then(|role_map| role_map.get(&champ_id.to_string()))
  } else {
    None
  };
  let role_entry = cfg.role_summoner_spells.get(role_key);

  let (mut has_s1, mut s1, mut has_s2, mut s2) = extract_spell_pair(custom_entry);
  let (r_has_s1, r_s1, r_has_s2, r_s2) = extract_spell_pair(role_entry);

  if !has_s1 && r_has_s1 {
    has_s1 = true;
    s1 = r_s1;
  }
  if !has_s2 && r_has_s2 {
    has_s2 = true;
    s2 = r_s2;
  }

  if !has_s1 {
    s1 = cfg.primary_summoner_spell.as_ref().and_then(normalize_spell_id);
  }
  if !has_s2 {
    s2 = cfg
      .secondary_summoner_spell
      .as_ref()
      .and_then(normalize_spell_id);
  }

  (s1, s2)
}

/// Champion the spell layers should key on: the committed pick, falling back
/// to declared intent so spells land before the pick locks.
pub fn spell_champion_id(session: &Value) -> i64 {
  let my_cell = match local_cell_id(session) {
    Some(cell) => cell,
    None => return 0,
  };

  if let Some(team) = session.get("myTeam").and_then(|v| v.as_array()) {
    for player in team {
      if player.get("cellId").and_then(|v| v.as_i64()) == Some(my_cell) {
        let committed = player.get("championId").and_then(|v| v.as_i64()).unwrap_or(0);
        if committed > 0 {
          return committed;
        }
        let intent = player
          .get("championPickIntent")
          .and_then(|v| v.as_i64())
          .unwrap_or(0);
        if intent > 0 {
          return intent;
        }
        return 0;
      }
    }
  }
  0
}

/// Resolve and submit the spell pair for this tick. Empty slots are left out
/// of the payload; the client treats the selection as idempotent state, so
/// resubmitting each tick is fine.
pub async fn sync_summoner_spells(
  client: &LcuClient,
  session: &Value,
  cfg: &AutomationConfig,
  role_key: &str,
) {
  let champ_id = spell_champion_id(session);
  let (s1, s2) = resolve_spell_pair(cfg, role_key, champ_id);

  if s1.is_none() && s2.is_none() {
    return;
  }

  let mut body = serde_json::Map::new();
  if let Some(id) = s1 {
    body.insert("spell1Id".to_string(), json!(id));
  }
  if let Some(id) = s2 {
    body.insert("spell2Id".to_string(), json!(id));
  }

  let body = Value::Object(body);
  if let Err(e) = client
    .patch("/lol-champ-select/v1/session/my-selection", Some(&body))
    .await
  {
    println!("[AUTO] Failed to submit summoner spells: {}", e);
  }
}
