// Static rune recommendation dataset (runes.json) and page conversion
//
// Two dataset shapes are supported:
//   1) direct:     "266" -> {primaryStyleId, subStyleId, selectedPerkIds[9]}
//   2) aggregated: "aatrox" -> {"rune_1": {"Precision": [..], "Sorcery": [..],
//                  "Shards": [..], "Win Rate": "51,3%"}, "rune_2": {...}}

use once_cell::sync::Lazy;
use serde_json::Value;
use std::path::PathBuf;

/// Top-level perk tree ids as the client knows them.
pub fn style_id_by_name(name: &str) -> Option<i64> {
  match name.trim().to_lowercase().as_str() {
    "precision" => Some(8000),
    "domination" => Some(8100),
    "sorcery" => Some(8200),
    "inspiration" => Some(8300),
    "resolve" => Some(8400),
    _ => None,
  }
}

/// A resolved rune page ready for submission. Only ever constructed with
/// both style ids present and exactly nine perk ids.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendedPage {
  pub primary_style_id: i64,
  pub sub_style_id: i64,
  pub selected_perk_ids: Vec<i64>,
}

fn runes_file_path() -> PathBuf {
  if let Ok(path) = std::env::var("RUNEPILOT_RUNES_FILE") {
    if !path.trim().is_empty() {
      return PathBuf::from(path);
    }
  }

  // Default to runes.json next to the executable so packaged installs work
  // regardless of the working directory they are launched from.
  std::env::current_exe()
    .ok()
    .and_then(|exe| exe.parent().map(|dir| dir.join("runes.json")))
    .unwrap_or_else(|| PathBuf::from("runes.json"))
}

pub fn load_runes() -> Value {
  let path = runes_file_path();
  match std::fs::read_to_string(&path) {
    Ok(content) => match serde_json::from_str(&content) {
      Ok(data) => data,
      Err(e) => {
        eprintln!("[RUNES] Failed to parse {}: {}", path.display(), e);
        Value::Object(serde_json::Map::new())
      }
    },
    Err(_) => {
      println!("[RUNES] No runes dataset at {}", path.display());
      Value::Object(serde_json::Map::new())
    }
  }
}

pub static RUNES_DATA: Lazy<Value> = Lazy::new(load_runes);

/// Coerce a JSON scalar to an integer the way the client data tends to need
/// it: real numbers and numeric strings both count.
pub fn coerce_i64(value: &Value) -> Option<i64> {
  if let Some(n) = value.as_i64() {
    return Some(n);
  }
  if let Some(f) = value.as_f64() {
    return Some(f as i64);
  }
  if let Some(s) = value.as_str() {
    return s.trim().parse::<i64>().ok();
  }
  None
}

/// Collect the coercible integers from a JSON array, skipping the rest.
pub fn safe_int_list(value: Option<&Value>) -> Vec<i64> {
  let mut result = Vec::new();
  if let Some(items) = value.and_then(|v| v.as_array()) {
    for item in items {
      if let Some(n) = coerce_i64(item) {
        result.push(n);
      }
    }
  }
  result
}

/// Best-effort win-rate parse. Accepts numbers directly; strings are scanned
/// for the first decimal run after normalizing comma decimals ("50,1" -> 50.1,
/// "45.2%" -> 45.2). Anything else is unparseable.
pub fn parse_win_rate(value: &Value) -> Option<f64> {
  if value.is_null() {
    return None;
  }
  if let Some(f) = value.as_f64() {
    return Some(f);
  }

  let raw = value.as_str()?.trim();
  if raw.is_empty() {
    return None;
  }
  let normalized = raw.replace(',', ".");

  let bytes = normalized.as_bytes();
  let start = bytes.iter().position(|b| b.is_ascii_digit())?;
  let mut end = start;
  while end < bytes.len() && bytes[end].is_ascii_digit() {
    end += 1;
  }
  if end < bytes.len() && bytes[end] == b'.' && end + 1 < bytes.len() && bytes[end + 1].is_ascii_digit()
  {
    end += 1;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
      end += 1;
    }
  }

  normalized[start..end].parse::<f64>().ok()
}

fn win_rate_of(blob: &Value) -> Option<f64> {
  for key in ["Win Rate", "win_rate", "WinRate", "winRate", "WIN RATE"] {
    if let Some(value) = blob.get(key) {
      if let Some(rate) = parse_win_rate(value) {
        return Some(rate);
      }
    }
  }
  None
}

/// Convert one aggregated-format candidate into a full page.
///
/// Tree names are matched case-insensitively against the style table; the
/// 4-rune tree becomes primary, the 2-rune tree (excluding primary) becomes
/// secondary, and a "shards" entry supplies the last three ids.
pub fn convert_blob_to_page(blob: &Value) -> Option<RecommendedPage> {
  let entries = blob.as_object()?;

  let mut style_entries: Vec<(&str, i64, usize)> = Vec::new();
  for (key, value) in entries {
    let style_id = match style_id_by_name(key) {
      Some(id) => id,
      None => continue,
    };
    let list = match value.as_array() {
      Some(l) => l,
      None => continue,
    };
    style_entries.push((key.as_str(), style_id, list.len()));
  }

  if style_entries.len() < 2 {
    return None;
  }

  let primary_key = style_entries
    .iter()
    .find(|(_, _, len)| *len == 4)
    .map(|(key, _, _)| *key)
    .unwrap_or(style_entries[0].0);
  let secondary_key = style_entries
    .iter()
    .find(|(key, _, len)| *len == 2 && *key != primary_key)
    .map(|(key, _, _)| *key)
    .unwrap_or(if style_entries[1].0 != primary_key {
      style_entries[1].0
    } else {
      style_entries[0].0
    });

  let primary_style_id = style_id_by_name(primary_key)?;
  let sub_style_id = style_id_by_name(secondary_key)?;

  let primary_ids = safe_int_list(blob.get(primary_key));
  let secondary_ids = safe_int_list(blob.get(secondary_key));

  let mut shard_ids = Vec::new();
  for (key, value) in entries {
    if key.trim().to_lowercase() == "shards" {
      shard_ids = safe_int_list(Some(value));
      break;
    }
  }

  let mut selected: Vec<i64> = Vec::with_capacity(9);
  selected.extend(primary_ids.iter().take(4));
  selected.extend(secondary_ids.iter().take(2));
  selected.extend(shard_ids.iter().take(3));

  if selected.len() != 9 {
    return None;
  }

  Some(RecommendedPage {
    primary_style_id,
    sub_style_id,
    selected_perk_ids: selected,
  })
}

/// Look up a recommended page for a champion from either dataset shape.
/// `slug` is only needed for the aggregated shape and may be None when the
/// champion catalog was unreachable.
pub fn get_recommended_page(
  runes_data: &Value,
  champ_id: i64,
  slug: Option<&str>,
) -> Option<RecommendedPage> {
  // Shape 1: direct champion-id record
  if let Some(direct) = runes_data.get(champ_id.to_string()) {
    if direct.get("primaryStyleId").is_some()
      && direct.get("subStyleId").is_some()
      && direct.get("selectedPerkIds").is_some()
    {
      let primary_style_id = coerce_i64(direct.get("primaryStyleId")?)?;
      let sub_style_id = coerce_i64(direct.get("subStyleId")?)?;
      let selected = safe_int_list(direct.get("selectedPerkIds"));
      if selected.len() != 9 {
        return None;
      }
      return Some(RecommendedPage {
        primary_style_id,
        sub_style_id,
        selected_perk_ids: selected,
      });
    }
  }

  // Shape 2: slug-keyed aggregated candidates
  let slug = slug?;
  let champ_blob = runes_data.get(slug)?.as_object()?;

  let mut candidates: Vec<(f64, &str, &Value)> = Vec::new();
  let mut default_blob: Option<&Value> = None;
  let mut fallback_blob: Option<&Value> = None;

  for (key, value) in champ_blob {
    if !key.starts_with("rune_") || !value.is_object() {
      continue;
    }
    if fallback_blob.is_none() {
      fallback_blob = Some(value);
    }
    if key == "rune_1" {
      default_blob = Some(value);
    }
    // Unparseable or missing win rates rank below every parseable one.
    let score = win_rate_of(value).unwrap_or(-1.0);
    candidates.push((score, key.as_str(), value));
  }

  if candidates.is_empty() {
    return None;
  }

  // Best win rate first; key as a stable tiebreaker.
  candidates.sort_by(|a, b| {
    b.0
      .partial_cmp(&a.0)
      .unwrap_or(std::cmp::Ordering::Equal)
      .then_with(|| b.1.cmp(&a.1))
  });

  for (score, key, blob) in &candidates {
    if let Some(page) = convert_blob_to_page(blob) {
      if *score >= 0.0 {
        println!(
          "[RUNES] Recommended rune selected: {}:{} winRate={}",
          slug, key, score
        );
      } else {
        println!("[RUNES] Recommended rune selected: {}:{}", slug, key);
      }
      return Some(page);
    }
  }

  if let Some(page) = default_blob.and_then(convert_blob_to_page) {
    return Some(page);
  }
  fallback_blob.and_then(convert_blob_to_page)
}
