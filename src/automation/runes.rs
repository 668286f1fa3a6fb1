// Rune page resolution and synchronization against the client's page list
//
// Resolution precedence: user-defined custom page for (role, champion),
// then the bundled recommendation dataset. The resolved page is pushed to
// the client through an ordered fallback chain; see `SyncStep`.

use serde_json::{json, Value};

use super::champ_select::local_champion_id;
use super::rune_data::{coerce_i64, get_recommended_page, safe_int_list, RecommendedPage, RUNES_DATA};
use super::types::MAX_RUNE_PAGE_NAME_LEN;
use crate::commands::champion_data::{get_champion_name_by_id, get_champion_slug_by_id};
use crate::commands::types::AutomationConfig;
use crate::lcu::LcuClient;

/// Validate a user-provided page object into a submittable page: both style
/// ids must coerce to integers and there must be exactly nine perk ids.
pub fn validate_custom_page(page: &Value) -> Option<RecommendedPage> {
  let primary_style_id = coerce_i64(page.get("primaryStyleId")?)?;
  let sub_style_id = coerce_i64(page.get("subStyleId")?)?;

  let selected = safe_int_list(page.get("selectedPerkIds"));
  if selected.len() != 9 {
    return None;
  }

  Some(RecommendedPage {
    primary_style_id,
    sub_style_id,
    selected_perk_ids: selected,
  })
}

/// Build a page name that fits the client's length limit.
///
/// Tiers: "Prefix Champ", then "Prefix-Champ", then truncate the champion
/// part to whatever fits after "Prefix ".
pub fn build_rune_page_name(prefix: &str, champion_name: &str) -> String {
  let prefix = {
    let trimmed = prefix.trim();
    if trimmed.is_empty() {
      "Auto"
    } else {
      trimmed
    }
  };
  let champ = {
    let trimmed = champion_name.trim();
    if trimmed.is_empty() {
      "Champion"
    } else {
      trimmed
    }
  };

  // Compact (no spaces or punctuation) champion name fits more often.
  let champ_compact: String = champ.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
  let champ_base = if champ_compact.is_empty() {
    champ.to_string()
  } else {
    champ_compact
  };

  let candidate = format!("{} {}", prefix, champ_base);
  if candidate.chars().count() <= MAX_RUNE_PAGE_NAME_LEN {
    return candidate;
  }

  let candidate = format!("{}-{}", prefix, champ_base);
  if candidate.chars().count() <= MAX_RUNE_PAGE_NAME_LEN {
    return candidate;
  }

  let prefix_len = prefix.chars().count();
  if prefix_len + 1 >= MAX_RUNE_PAGE_NAME_LEN {
    return prefix.chars().take(MAX_RUNE_PAGE_NAME_LEN).collect();
  }
  let max_champ_len = MAX_RUNE_PAGE_NAME_LEN - prefix_len - 1;
  let champ_trunc: String = champ_base.chars().take(max_champ_len).collect();
  format!("{} {}", prefix, champ_trunc)
}

/// Does this page name belong to us? Matches the current naming convention
/// and the legacy marker from earlier builds.
pub fn is_automation_page_name(name: &str) -> bool {
  let n = name.trim();
  if n.is_empty() {
    return false;
  }
  if n.starts_with("Auto ")
    || n.starts_with("Custom ")
    || n.starts_with("Auto-")
    || n.starts_with("Custom-")
  {
    return true;
  }
  // Legacy names from earlier builds
  n.starts_with("LoLAutomation")
}

/// The client reports the page-count limit only through an error-body
/// substring. Kept in one place so a structured error code can replace it.
pub fn is_page_limit_error(status: u16, body: &str) -> bool {
  status == 400 && body.to_lowercase().contains("max pages reached")
}

fn page_id(page: &Value) -> Option<i64> {
  page.get("id").and_then(coerce_i64)
}

fn page_name(page: &Value) -> &str {
  page.get("name").and_then(|v| v.as_str()).unwrap_or("")
}

// The client uses isEditable; missing counts as editable.
fn is_editable(page: &Value) -> bool {
  page.get("isEditable").and_then(|v| v.as_bool()) != Some(false)
}

// The client uses isDeletable; missing counts as not deletable.
fn is_deletable(page: &Value) -> bool {
  page.get("isDeletable").and_then(|v| v.as_bool()) == Some(true)
}

fn is_current(page: &Value) -> bool {
  page.get("current").and_then(|v| v.as_bool()) == Some(true)
}

/// Overwrite one remote page in place. Ok(false) = the client rejected the
/// write (try the next step); Err = transport failure (abort the entry).
async fn put_page(
  client: &LcuClient,
  page: &Value,
  name: &str,
  resolved: &RecommendedPage,
) -> Result<bool, String> {
  let pid = match page_id(page) {
    Some(id) => id,
    None => return Ok(false),
  };

  let payload = json!({
    "id": pid,
    "name": name,
    "primaryStyleId": resolved.primary_style_id,
    "subStyleId": resolved.sub_style_id,
    "selectedPerkIds": resolved.selected_perk_ids,
    "current": true,
  });

  let res = client
    .put(&format!("/lol-perks/v1/pages/{}", pid), Some(&payload))
    .await?;
  if res.is_success() {
    println!("[RUNES] Updated rune page id={} name={}", pid, name);
    return Ok(true);
  }
  println!(
    "[RUNES] Failed to update rune page: {} {}",
    res.status, res.body
  );
  Ok(false)
}

/// Ordered fallback chain for pushing the resolved page to the client.
/// Steps run top to bottom until one succeeds; the cleanup and overwrite
/// steps only arm after a creation attempt died on the page-count limit.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SyncStep {
  /// Overwrite the first editable page already named by the automation.
  UpdateExisting,
  /// Create a fresh page.
  CreateNew,
  /// Page limit hit: delete our old deletable pages, then create again.
  CleanupAndRetry,
  /// Still full: overwrite whatever page is currently selected.
  OverwriteCurrent,
  /// Last resort: overwrite any editable page.
  OverwriteAny,
}

const SYNC_STEPS: [SyncStep; 5] = [
  SyncStep::UpdateExisting,
  SyncStep::CreateNew,
  SyncStep::CleanupAndRetry,
  SyncStep::OverwriteCurrent,
  SyncStep::OverwriteAny,
];

async fn sync_page(
  client: &LcuClient,
  pages: &[Value],
  name: &str,
  resolved: &RecommendedPage,
) -> Result<bool, String> {
  let create_payload = json!({
    "name": name,
    "primaryStyleId": resolved.primary_style_id,
    "subStyleId": resolved.sub_style_id,
    "selectedPerkIds": resolved.selected_perk_ids,
    "current": true,
  });

  let mut limit_hit = false;
  let mut create_failure = String::new();

  for step in SYNC_STEPS {
    match step {
      SyncStep::UpdateExisting => {
        let target = pages
          .iter()
          .find(|p| is_editable(p) && is_automation_page_name(page_name(p)));
        if let Some(page) = target {
          if put_page(client, page, name, resolved).await? {
            return Ok(true);
          }
        }
      }
      SyncStep::CreateNew => {
        let res = client.post("/lol-perks/v1/pages", Some(&create_payload)).await?;
        if res.is_success() {
          println!("[RUNES] Created rune page {}", name);
          return Ok(true);
        }
        create_failure = format!("{} {}", res.status, res.body);
        if is_page_limit_error(res.status, &res.body) {
          limit_hit = true;
        } else {
          // Anything but the page limit is not recoverable by the
          // remaining steps.
          break;
        }
      }
      SyncStep::CleanupAndRetry => {
        if !limit_hit {
          continue;
        }
        let mut deleted_any = false;
        for page in pages {
          if !is_editable(page) || !is_deletable(page) || is_current(page) {
            continue;
          }
          if !is_automation_page_name(page_name(page)) {
            continue;
          }
          let pid = match page_id(page) {
            Some(id) => id,
            None => continue,
          };
          let del_res = client.delete(&format!("/lol-perks/v1/pages/{}", pid)).await?;
          if del_res.status == 200 || del_res.status == 204 {
            deleted_any = true;
          }
        }

        if deleted_any {
          let retry = client.post("/lol-perks/v1/pages", Some(&create_payload)).await?;
          if retry.is_success() {
            println!("[RUNES] Created rune page {} (after cleanup)", name);
            return Ok(true);
          }
          create_failure = format!("{} {}", retry.status, retry.body);
        }
      }
      SyncStep::OverwriteCurrent => {
        if !limit_hit {
          continue;
        }
        let target = pages.iter().find(|p| is_editable(p) && is_current(p));
        if let Some(page) = target {
          if put_page(client, page, name, resolved).await? {
            return Ok(true);
          }
        }
      }
      SyncStep::OverwriteAny => {
        if !limit_hit {
          continue;
        }
        let target = pages.iter().find(|p| is_editable(p));
        if let Some(page) = target {
          if put_page(client, page, name, resolved).await? {
            return Ok(true);
          }
        }
      }
    }
  }

  println!("[RUNES] Failed to create rune page: {}", create_failure);
  Ok(false)
}

/// Resolve and apply the rune page for the locked champion. Returns true
/// only when a page actually reached the client; callers gate on that to
/// apply at most once per finalization entry.
pub async fn apply_runes(
  client: &LcuClient,
  session: &Value,
  cfg: &AutomationConfig,
  role_for_runes: &str,
) -> bool {
  let my_champ_id = local_champion_id(session);
  if my_champ_id == 0 {
    return false;
  }

  // 1) custom page for (role, champion), 2) dataset recommendation
  let mut resolved: Option<RecommendedPage> = None;
  let mut used_custom = false;

  let custom_page = cfg
    .custom_runes
    .get(role_for_runes)
    .and_then(|role_pages| role_pages.get(&my_champ_id.to_string()));
  if let Some(page) = custom_page {
    match validate_custom_page(page) {
      Some(valid) => {
        resolved = Some(valid);
        used_custom = true;
      }
      None => {
        println!(
          "[RUNES] Invalid custom rune page for championId={}, falling back to recommended",
          my_champ_id
        );
      }
    }
  }

  if resolved.is_none() {
    let slug = get_champion_slug_by_id(client, my_champ_id).await;
    resolved = get_recommended_page(&RUNES_DATA, my_champ_id, slug.as_deref());
  }

  let resolved = match resolved {
    Some(page) => page,
    None => {
      println!(
        "[RUNES] No recommended runes found for championId={}",
        my_champ_id
      );
      return false;
    }
  };

  let champ_name = get_champion_name_by_id(client, my_champ_id)
    .await
    .unwrap_or_else(|| my_champ_id.to_string());
  let prefix = if used_custom { "Custom" } else { "Auto" };
  let desired_name = build_rune_page_name(prefix, &champ_name);

  let pages = match client.get("/lol-perks/v1/pages").await {
    Ok(res) if res.status == 200 => match res.json() {
      Some(Value::Array(pages)) => pages,
      _ => {
        println!("[RUNES] Unexpected /lol-perks/v1/pages response");
        return false;
      }
    },
    Ok(res) => {
      println!(
        "[RUNES] Failed to fetch rune pages: {} {}",
        res.status, res.body
      );
      return false;
    }
    Err(e) => {
      println!("[RUNES] Failed to fetch rune pages: {}", e);
      return false;
    }
  };

  match sync_page(client, &pages, &desired_name, &resolved).await {
    Ok(applied) => applied,
    Err(e) => {
      println!("[RUNES] Error applying runes: {}", e);
      false
    }
  }
}
