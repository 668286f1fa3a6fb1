// Ban planning: teammate-intent avoidance and skip-log deduplication

use super::test_helpers::{make_session, Action, Teammate, LOCAL_CELL};
use crate::automation::champ_select::{is_teammate_showing, plan_ban, BanPlan};

fn open_ban(id: i64) -> Action {
  Action {
    id,
    action_type: "ban",
    actor_cell_id: LOCAL_CELL,
    completed: false,
  }
}

#[test]
fn submits_when_nobody_shows_the_target() {
  let session = make_session(&[Teammate::new(LOCAL_CELL)], &[open_ban(7)], &[]);
  assert_eq!(plan_ban(&session, 157, None), BanPlan::Submit { action_id: 7 });
}

#[test]
fn no_action_without_an_open_ban() {
  let completed = Action {
    id: 7,
    action_type: "ban",
    actor_cell_id: LOCAL_CELL,
    completed: true,
  };
  let session = make_session(&[Teammate::new(LOCAL_CELL)], &[completed], &[]);
  assert_eq!(plan_ban(&session, 157, None), BanPlan::NoAction);
}

#[test]
fn skips_when_teammate_declares_intent() {
  let session = make_session(
    &[Teammate::new(LOCAL_CELL), Teammate::new(3).with_intent(157)],
    &[open_ban(7)],
    &[],
  );
  assert!(is_teammate_showing(&session, 157));
  assert_eq!(
    plan_ban(&session, 157, None),
    BanPlan::Skip {
      key: (7, 157),
      announce: true
    }
  );
}

#[test]
fn skips_when_teammate_already_committed() {
  let session = make_session(
    &[
      Teammate::new(LOCAL_CELL),
      Teammate::new(3).with_champion(157),
    ],
    &[open_ban(7)],
    &[],
  );
  assert_eq!(
    plan_ban(&session, 157, None),
    BanPlan::Skip {
      key: (7, 157),
      announce: true
    }
  );
}

#[test]
fn announces_a_repeated_skip_only_once() {
  let session = make_session(
    &[Teammate::new(LOCAL_CELL), Teammate::new(3).with_intent(157)],
    &[open_ban(7)],
    &[],
  );

  // First tick: announce and remember the key.
  let plan = plan_ban(&session, 157, None);
  let key = match plan {
    BanPlan::Skip { key, announce } => {
      assert!(announce);
      key
    }
    other => panic!("expected skip, got {:?}", other),
  };

  // Following ticks with the same key stay quiet.
  assert_eq!(
    plan_ban(&session, 157, Some(key)),
    BanPlan::Skip {
      key,
      announce: false
    }
  );
}

#[test]
fn announces_again_for_a_different_target() {
  let session = make_session(
    &[Teammate::new(LOCAL_CELL), Teammate::new(3).with_intent(238)],
    &[open_ban(7)],
    &[],
  );

  // The marker from a previous (action, champion) pair does not silence a
  // new one.
  assert_eq!(
    plan_ban(&session, 238, Some((7, 157))),
    BanPlan::Skip {
      key: (7, 238),
      announce: true
    }
  );
}

#[test]
fn resubmits_once_the_intent_clears() {
  let session = make_session(&[Teammate::new(LOCAL_CELL), Teammate::new(3)], &[open_ban(7)], &[]);
  // Marker left over from earlier ticks must not block the ban itself.
  assert_eq!(
    plan_ban(&session, 157, Some((7, 157))),
    BanPlan::Submit { action_id: 7 }
  );
}
