use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

// Data structures shared between the HTTP surface and the automation loop

/// Automation settings sent by the desktop UI. The whole structure is
/// replaced on every `/start_automation` call; the loop only ever reads a
/// snapshot behind an `Arc`.
///
/// Spell entries (`role_summoner_spells`, `custom_summoner_spells` leaves and
/// the two global fields) stay as raw `Value`s: a key that is present with
/// `null` means "explicitly no spell for this slot" and must not collapse
/// into "not configured".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationConfig {
  pub primary_role: Option<String>,
  pub secondary_role: Option<String>,
  pub primary_summoner_spell: Option<Value>,
  pub secondary_summoner_spell: Option<Value>,
  // role -> {"spell1Id": .., "spell2Id": ..} (or legacy [id, id] pair)
  pub role_summoner_spells: HashMap<String, Value>,
  // role -> championId(string) -> spell pair entry
  pub custom_summoner_spells: HashMap<String, HashMap<String, Value>>,
  pub queue_id: i64,
  // role -> ordered champion preference list
  pub role_champions: HashMap<String, Vec<i64>>,
  // role -> champion to ban
  pub role_bans: HashMap<String, i64>,
  // role -> championId(string) -> rune page object
  pub custom_runes: HashMap<String, HashMap<String, Value>>,
  pub auto_queue: bool,
}

impl Default for AutomationConfig {
  fn default() -> Self {
    AutomationConfig {
      primary_role: None,
      secondary_role: None,
      primary_summoner_spell: None,
      secondary_summoner_spell: None,
      role_summoner_spells: HashMap::new(),
      custom_summoner_spells: HashMap::new(),
      queue_id: 420,
      role_champions: HashMap::new(),
      role_bans: HashMap::new(),
      custom_runes: HashMap::new(),
      auto_queue: true,
    }
  }
}

impl AutomationConfig {
  /// Uppercased primary role, or empty string when unset.
  pub fn primary_role_key(&self) -> String {
    self
      .primary_role
      .as_deref()
      .unwrap_or("")
      .trim()
      .to_uppercase()
  }
}

/// One owned champion as reported to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChampionInfo {
  pub id: i64,
  pub name: String,
  pub alias: String,
}
