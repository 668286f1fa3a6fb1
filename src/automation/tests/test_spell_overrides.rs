// Summoner spell layering: presence vs explicit-none, entry shapes

use serde_json::json;

use crate::automation::spells::{extract_spell_pair, normalize_spell_id, resolve_spell_pair};
use crate::commands::types::AutomationConfig;

fn config_with_layers() -> AutomationConfig {
  let mut cfg = AutomationConfig::default();
  cfg.primary_summoner_spell = Some(json!(4)); // Flash
  cfg.secondary_summoner_spell = Some(json!(12)); // Teleport
  cfg
    .role_summoner_spells
    .insert("TOP".to_string(), json!({ "spell1Id": 6, "spell2Id": 14 }));
  cfg
}

#[test]
fn normalizes_spell_ids() {
  assert_eq!(normalize_spell_id(&json!(4)), Some(4));
  assert_eq!(normalize_spell_id(&json!("7")), Some(7));
  assert_eq!(normalize_spell_id(&json!(0)), None);
  assert_eq!(normalize_spell_id(&json!(-1)), None);
  assert_eq!(normalize_spell_id(&json!(null)), None);
  assert_eq!(normalize_spell_id(&json!("flash")), None);
}

#[test]
fn extracts_object_entries_with_presence() {
  let entry = json!({ "spell1Id": 4, "spell2Id": 7 });
  assert_eq!(extract_spell_pair(Some(&entry)), (true, Some(4), true, Some(7)));

  // spell1Id absent, spell2Id explicitly null: slot 2 is present but empty.
  let entry = json!({ "spell2Id": null });
  assert_eq!(extract_spell_pair(Some(&entry)), (false, None, true, None));
}

#[test]
fn extracts_legacy_key_spellings_and_pairs() {
  let entry = json!({ "spell1": 4, "spell2": 7 });
  assert_eq!(extract_spell_pair(Some(&entry)), (true, Some(4), true, Some(7)));

  let entry = json!([4, 7]);
  assert_eq!(extract_spell_pair(Some(&entry)), (true, Some(4), true, Some(7)));

  // A one-element list carries no usable pair.
  let entry = json!([4]);
  assert_eq!(extract_spell_pair(Some(&entry)), (false, None, false, None));

  assert_eq!(extract_spell_pair(None), (false, None, false, None));
}

#[test]
fn explicit_none_is_not_replaced_by_lower_layers() {
  let mut cfg = config_with_layers();
  cfg.custom_summoner_spells.insert(
    "TOP".to_string(),
    [("157".to_string(), json!({ "spell2Id": null }))]
      .into_iter()
      .collect(),
  );

  // Slot 1 has no custom key -> role default 6. Slot 2 is custom-present
  // with null -> stays empty, role default 14 must not leak through.
  assert_eq!(resolve_spell_pair(&cfg, "TOP", 157), (Some(6), None));
}

#[test]
fn custom_beats_role_beats_global() {
  let mut cfg = config_with_layers();
  cfg.custom_summoner_spells.insert(
    "TOP".to_string(),
    [("157".to_string(), json!({ "spell1Id": 21 }))]
      .into_iter()
      .collect(),
  );

  // Slot 1 from custom, slot 2 from role.
  assert_eq!(resolve_spell_pair(&cfg, "TOP", 157), (Some(21), Some(14)));

  // Another champion: no custom entry, role defaults apply.
  assert_eq!(resolve_spell_pair(&cfg, "TOP", 238), (Some(6), Some(14)));

  // Role without an entry: globals apply.
  assert_eq!(resolve_spell_pair(&cfg, "MIDDLE", 238), (Some(4), Some(12)));
}

#[test]
fn no_champion_disables_only_the_custom_layer() {
  let mut cfg = config_with_layers();
  cfg.custom_summoner_spells.insert(
    "TOP".to_string(),
    [("157".to_string(), json!({ "spell1Id": 21, "spell2Id": 32 }))]
      .into_iter()
      .collect(),
  );

  assert_eq!(resolve_spell_pair(&cfg, "TOP", 0), (Some(6), Some(14)));
}

#[test]
fn empty_config_resolves_nothing() {
  let cfg = AutomationConfig::default();
  assert_eq!(resolve_spell_pair(&cfg, "TOP", 157), (None, None));
}
