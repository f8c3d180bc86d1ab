use chrono::{Duration, TimeZone, Utc};
use vajralib::{
    ads::{
        board::AdBoard,
        rotation::{Rotation, RotationState},
    },
    model::{AdStatus, Advertisement},
};

fn t(secs: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn approved(id: &str, placements: &[&str]) -> Advertisement {
    let mut ad = Advertisement::new(id, id);
    ad.status = AdStatus::Approved;
    ad.placements = Some(placements.iter().map(|p| p.to_string()).collect());
    ad
}

#[test]
fn rotates_round_robin_on_interval() {
    let mut r = Rotation::new(3, Duration::seconds(8), t(0));
    assert_eq!(r.state(), RotationState::Showing(0));

    assert_eq!(r.tick(t(5)), RotationState::Showing(0));
    assert_eq!(r.tick(t(8)), RotationState::Showing(1));
    assert_eq!(r.tick(t(16)), RotationState::Showing(2));
    assert_eq!(r.tick(t(24)), RotationState::Showing(0));
}

#[test]
fn missed_ticks_catch_up() {
    let mut r = Rotation::new(3, Duration::seconds(10), t(0));
    assert_eq!(r.tick(t(25)), RotationState::Showing(2));
}

#[test]
fn manual_advance_wraps_and_restarts_timer() {
    let mut r = Rotation::new(2, Duration::seconds(10), t(0));
    assert_eq!(r.advance(t(3)), RotationState::Showing(1));
    assert_eq!(r.tick(t(10)), RotationState::Showing(1));
    assert_eq!(r.tick(t(13)), RotationState::Showing(0));
    assert_eq!(r.advance(t(14)), RotationState::Showing(1));
    assert_eq!(r.advance(t(15)), RotationState::Showing(0));
}

#[test]
fn dismiss_is_sticky_until_reset() {
    let mut r = Rotation::new(2, Duration::seconds(1), t(0));
    r.dismiss();
    assert_eq!(r.tick(t(100)), RotationState::Dismissed);
    assert_eq!(r.advance(t(101)), RotationState::Dismissed);
    assert_eq!(r.current(), None);

    r.reset(t(200));
    assert_eq!(r.current(), Some(0));
}

#[test]
fn empty_rotation_starts_dismissed() {
    let mut r = Rotation::new(0, Duration::seconds(1), t(0));
    assert_eq!(r.tick(t(10)), RotationState::Dismissed);
}

#[test]
fn board_refresh_and_staleness() {
    let mut board = AdBoard::new();
    assert!(board.is_stale(t(0), Duration::seconds(300)));

    board.refresh(
        vec![
            approved("a1", &["HOME"]),
            approved("a2", &["LOANS"]),
            approved("a3", &["home", "loans"]),
        ],
        t(0),
    );
    assert!(!board.is_stale(t(299), Duration::seconds(300)));
    assert!(board.is_stale(t(300), Duration::seconds(300)));

    let ids: Vec<&str> = board.eligible_for(Some("loans")).iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["a2", "a3"]);
    assert_eq!(board.eligible_for(None).len(), 3);

    let mut r = board.rotation_for(Some("home"), Duration::seconds(8), t(0));
    assert_eq!(r.tick(t(8)), RotationState::Showing(1));
    assert_eq!(r.tick(t(16)), RotationState::Showing(0));
}
