// Recommendation dataset parsing: both shapes, scoring, conversion

use serde_json::json;

use crate::automation::rune_data::{
  convert_blob_to_page, get_recommended_page, parse_win_rate, style_id_by_name,
};

#[test]
fn style_table_matches_client_ids() {
  assert_eq!(style_id_by_name("Precision"), Some(8000));
  assert_eq!(style_id_by_name(" domination "), Some(8100));
  assert_eq!(style_id_by_name("SORCERY"), Some(8200));
  assert_eq!(style_id_by_name("unknown"), None);
}

#[test]
fn converts_tree_lists_in_primary_secondary_shard_order() {
  let blob = json!({
    "Domination": [8112, 8126, 8138, 8135],
    "Sorcery": [8275, 8234],
    "Shards": [5008, 5008, 5002],
    "Win Rate": "51.2%",
  });

  let page = convert_blob_to_page(&blob).expect("blob should convert");
  assert_eq!(page.primary_style_id, 8100);
  assert_eq!(page.sub_style_id, 8200);
  assert_eq!(
    page.selected_perk_ids,
    vec![8112, 8126, 8138, 8135, 8275, 8234, 5008, 5008, 5002]
  );
}

#[test]
fn rejects_blobs_missing_a_second_tree() {
  let blob = json!({
    "Domination": [8112, 8126, 8138, 8135],
    "Shards": [5008, 5008, 5002],
  });
  assert_eq!(convert_blob_to_page(&blob), None);
}

#[test]
fn rejects_blobs_with_wrong_counts() {
  let blob = json!({
    "Domination": [8112, 8126],
    "Sorcery": [8275, 8234],
    "Shards": [5008, 5008, 5002],
  });
  // 2 + 2 + 3 ids can never reach nine.
  assert_eq!(convert_blob_to_page(&blob), None);
}

#[test]
fn parses_win_rates_tolerantly() {
  assert_eq!(parse_win_rate(&json!("45.2%")), Some(45.2));
  assert_eq!(parse_win_rate(&json!("50,1")), Some(50.1));
  assert_eq!(parse_win_rate(&json!("Win 48")), Some(48.0));
  assert_eq!(parse_win_rate(&json!(51.5)), Some(51.5));
  assert_eq!(parse_win_rate(&json!(47)), Some(47.0));
  assert_eq!(parse_win_rate(&json!("n/a")), None);
  assert_eq!(parse_win_rate(&json!("")), None);
  assert_eq!(parse_win_rate(&json!(null)), None);
}

#[test]
fn picks_the_highest_win_rate_candidate() {
  let data = json!({
    "zed": {
      "rune_1": {
        "Domination": [1, 2, 3, 4],
        "Sorcery": [5, 6],
        "Shards": [7, 8, 9],
        "Win Rate": "45.2%",
      },
      "rune_2": {
        "Precision": [11, 12, 13, 14],
        "Resolve": [15, 16],
        "Shards": [17, 18, 19],
        "Win Rate": "50,1",
      },
    },
  });

  let page = get_recommended_page(&data, 238, Some("zed")).expect("should resolve");
  // 50.1 beats 45.2, comma decimal included.
  assert_eq!(page.primary_style_id, 8000);
  assert_eq!(page.selected_perk_ids[0], 11);
}

#[test]
fn unparseable_rate_ranks_below_any_parseable_one() {
  let data = json!({
    "zed": {
      "rune_1": {
        "Domination": [1, 2, 3, 4],
        "Sorcery": [5, 6],
        "Shards": [7, 8, 9],
        "Win Rate": "???",
      },
      "rune_2": {
        "Precision": [11, 12, 13, 14],
        "Resolve": [15, 16],
        "Shards": [17, 18, 19],
        "Win Rate": "40.0%",
      },
    },
  });

  let page = get_recommended_page(&data, 238, Some("zed")).expect("should resolve");
  assert_eq!(page.primary_style_id, 8000);
}

#[test]
fn falls_through_to_a_convertible_candidate() {
  // The better-scored candidate is structurally broken (one tree only);
  // the scan must continue down the ranking.
  let data = json!({
    "zed": {
      "rune_1": {
        "Domination": [1, 2, 3, 4],
        "Sorcery": [5, 6],
        "Shards": [7, 8, 9],
        "Win Rate": "45.0%",
      },
      "rune_2": {
        "Precision": [11, 12, 13, 14],
        "Win Rate": "55.0%",
      },
    },
  });

  let page = get_recommended_page(&data, 238, Some("zed")).expect("should resolve");
  assert_eq!(page.primary_style_id, 8100);
  assert_eq!(page.selected_perk_ids[0], 1);
}

#[test]
fn resolves_direct_shape_without_a_slug() {
  let data = json!({
    "238": {
      "primaryStyleId": "8100",
      "subStyleId": 8200,
      "selectedPerkIds": [1, 2, 3, 4, 5, 6, 7, 8, 9],
    },
  });

  let page = get_recommended_page(&data, 238, None).expect("should resolve");
  assert_eq!(page.primary_style_id, 8100);
  assert_eq!(page.sub_style_id, 8200);
  assert_eq!(page.selected_perk_ids.len(), 9);
}

#[test]
fn rejects_direct_shape_with_wrong_perk_count() {
  let data = json!({
    "238": {
      "primaryStyleId": 8100,
      "subStyleId": 8200,
      "selectedPerkIds": [1, 2, 3],
    },
  });
  assert_eq!(get_recommended_page(&data, 238, None), None);
}

#[test]
fn unknown_champion_resolves_nothing() {
  let data = json!({ "zed": { "rune_1": {} } });
  assert_eq!(get_recommended_page(&data, 999, Some("missing")), None);
  assert_eq!(get_recommended_page(&data, 999, None), None);
}
