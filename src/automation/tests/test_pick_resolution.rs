// Pick candidate filtering and ordering

use std::collections::HashSet;

use super::test_helpers::{make_session, Action, Teammate, LOCAL_CELL};
use crate::automation::champ_select::{
  filter_pick_candidates, find_open_action, is_banned, is_picked,
};

#[test]
fn preserves_user_order() {
  let session = make_session(&[Teammate::new(LOCAL_CELL)], &[], &[]);
  let candidates = filter_pick_candidates(&session, &[157, 238, 91], None);
  assert_eq!(candidates, vec![157, 238, 91]);
}

#[test]
fn never_skips_an_available_earlier_candidate() {
  // 157 is banned, 238 is available: 238 must come before 91 and nothing
  // may be reordered around it.
  let session = make_session(&[Teammate::new(LOCAL_CELL)], &[], &[157]);
  let candidates = filter_pick_candidates(&session, &[157, 238, 91], None);
  assert_eq!(candidates, vec![238, 91]);
  assert_eq!(candidates.first(), Some(&238));
}

#[test]
fn drops_banned_and_picked_champions() {
  let session = make_session(
    &[
      Teammate::new(LOCAL_CELL),
      Teammate::new(3).with_champion(238),
    ],
    &[],
    &[157],
  );
  assert!(is_banned(&session, 157));
  assert!(is_picked(&session, 238));

  let candidates = filter_pick_candidates(&session, &[157, 238, 91], None);
  assert_eq!(candidates, vec![91]);
}

#[test]
fn applies_pickable_filter_when_present() {
  let session = make_session(&[Teammate::new(LOCAL_CELL)], &[], &[]);
  let pickable: HashSet<i64> = [91, 157].into_iter().collect();

  let candidates = filter_pick_candidates(&session, &[157, 238, 91], Some(&pickable));
  assert_eq!(candidates, vec![157, 91]);
}

#[test]
fn skips_pickable_filter_when_endpoint_unavailable() {
  let session = make_session(&[Teammate::new(LOCAL_CELL)], &[], &[]);
  let candidates = filter_pick_candidates(&session, &[157, 238], None);
  assert_eq!(candidates, vec![157, 238]);
}

#[test]
fn drops_invalid_champion_ids() {
  let session = make_session(&[Teammate::new(LOCAL_CELL)], &[], &[]);
  let candidates = filter_pick_candidates(&session, &[0, -5, 157], None);
  assert_eq!(candidates, vec![157]);
}

#[test]
fn finds_open_pick_action_for_local_cell_only() {
  let session = make_session(
    &[Teammate::new(LOCAL_CELL)],
    &[
      Action {
        id: 10,
        action_type: "pick",
        actor_cell_id: 4,
        completed: false,
      },
      Action {
        id: 11,
        action_type: "pick",
        actor_cell_id: LOCAL_CELL,
        completed: true,
      },
      Action {
        id: 12,
        action_type: "pick",
        actor_cell_id: LOCAL_CELL,
        completed: false,
      },
    ],
    &[],
  );

  assert_eq!(find_open_action(&session, "pick"), Some(12));
  assert_eq!(find_open_action(&session, "ban"), None);
}

#[test]
fn zero_champion_never_counts_as_picked() {
  let session = make_session(&[Teammate::new(LOCAL_CELL)], &[], &[]);
  assert!(!is_picked(&session, 0));
}
