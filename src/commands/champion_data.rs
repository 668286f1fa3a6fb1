// Champion catalog: id -> name/slug caches and the owned-champion listing

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::commands::types::ChampionInfo;
use crate::lcu::LcuClient;

// Populated once from the LCU champion summary; champion ids are stable for
// the lifetime of the client process.
static CHAMP_SLUG_BY_ID: Lazy<Mutex<HashMap<i64, String>>> =
  Lazy::new(|| Mutex::new(HashMap::new()));
static CHAMP_NAME_BY_ID: Lazy<Mutex<HashMap<i64, String>>> =
  Lazy::new(|| Mutex::new(HashMap::new()));

/// Slug used to key the aggregated rune dataset. Must match the slug format
/// the dataset was generated with: a couple of legacy aliases, else
/// lowercased.
pub fn champion_slug_from_alias(alias: &str) -> String {
  let alias = alias.trim();
  match alias {
    "MonkeyKing" => "wukong".to_string(),
    "FiddleSticks" => "fiddlesticks".to_string(),
    _ => alias.to_lowercase(),
  }
}

fn cached_slug(champ_id: i64) -> Option<String> {
  CHAMP_SLUG_BY_ID
    .lock()
    .ok()
    .and_then(|map| map.get(&champ_id).cloned())
}

fn cached_name(champ_id: i64) -> Option<String> {
  CHAMP_NAME_BY_ID
    .lock()
    .ok()
    .and_then(|map| map.get(&champ_id).cloned())
}

/// Fill both caches from the champion summary in one pass.
async fn populate_champion_caches(client: &LcuClient) {
  let res = match client
    .get("/lol-game-data/assets/v1/champion-summary.json")
    .await
  {
    Ok(res) if res.status == 200 => res,
    _ => return,
  };

  let champs = match res.json() {
    Some(serde_json::Value::Array(champs)) => champs,
    _ => return,
  };

  let mut slugs = match CHAMP_SLUG_BY_ID.lock() {
    Ok(guard) => guard,
    Err(_) => return,
  };
  let mut names = match CHAMP_NAME_BY_ID.lock() {
    Ok(guard) => guard,
    Err(_) => return,
  };

  for champ in champs {
    let cid = match champ.get("id").and_then(|v| v.as_i64()) {
      Some(id) => id,
      None => continue,
    };

    let name = champ
      .get("name")
      .and_then(|v| v.as_str())
      .filter(|s| !s.is_empty())
      .or_else(|| champ.get("alias").and_then(|v| v.as_str()));
    if let Some(name) = name {
      names.entry(cid).or_insert_with(|| name.to_string());
    }

    let alias = champ
      .get("alias")
      .and_then(|v| v.as_str())
      .filter(|s| !s.is_empty())
      .or_else(|| champ.get("name").and_then(|v| v.as_str()))
      .unwrap_or("");
    let slug = champion_slug_from_alias(alias);
    if !slug.is_empty() {
      slugs.insert(cid, slug);
    }
  }
}

/// Dataset slug for a champion id, via the cache or one summary fetch.
pub async fn get_champion_slug_by_id(client: &LcuClient, champ_id: i64) -> Option<String> {
  if let Some(slug) = cached_slug(champ_id) {
    return Some(slug);
  }
  populate_champion_caches(client).await;
  cached_slug(champ_id)
}

/// Display name for a champion id, via the cache or one summary fetch.
pub async fn get_champion_name_by_id(client: &LcuClient, champ_id: i64) -> Option<String> {
  if let Some(name) = cached_name(champ_id) {
    return Some(name);
  }
  populate_champion_caches(client).await;
  cached_name(champ_id)
}

/// Champions the player owns, keyed by id. Empty on any failure so the UI
/// degrades to an empty list.
pub async fn load_champions_map(client: &LcuClient) -> HashMap<i64, ChampionInfo> {
  let res = match client.get("/lol-champions/v1/owned-champions-minimal").await {
    Ok(res) if res.status == 200 => res,
    Ok(_) => return HashMap::new(),
    Err(e) => {
      println!("[API] Error loading owned champions: {}", e);
      return HashMap::new();
    }
  };

  let champs = match res.json() {
    Some(serde_json::Value::Array(champs)) => champs,
    _ => return HashMap::new(),
  };

  let mut valid_champs = HashMap::new();
  for champ in champs {
    let cid = match champ.get("id").and_then(|v| v.as_i64()) {
      Some(id) if id > 0 => id,
      _ => continue,
    };

    // Skip entries the catalog explicitly marks as not owned.
    let owned = champ
      .get("ownership")
      .and_then(|o| o.get("owned"))
      .and_then(|v| v.as_bool());
    if owned == Some(false) {
      continue;
    }

    valid_champs.insert(
      cid,
      ChampionInfo {
        id: cid,
        name: champ
          .get("name")
          .and_then(|v| v.as_str())
          .unwrap_or("Unknown")
          .to_string(),
        alias: champ
          .get("alias")
          .and_then(|v| v.as_str())
          .unwrap_or("")
          .to_string(),
      },
    );
  }

  valid_champs
}
