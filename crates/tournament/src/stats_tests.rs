use super::*;

#[test]
fn test_record_credits_first_mover_in_phase_one() {
    let mut stats = TournamentStats::new();
    stats.record(Phase::AFirst, Outcome::FirstMoverWin);
    stats.record(Phase::AFirst, Outcome::SecondMoverWin);
    assert_eq!(stats.as_tuple(), (1, 1, 0));
}

#[test]
fn test_record_inverts_in_phase_two() {
    let mut stats = TournamentStats::new();
    stats.record(Phase::BFirst, Outcome::FirstMoverWin);
    stats.record(Phase::BFirst, Outcome::FirstMoverWin);
    stats.record(Phase::BFirst, Outcome::SecondMoverWin);
    assert_eq!(stats.as_tuple(), (1, 2, 0));
}

#[test]
fn test_other_outcomes_count_as_draws() {
    let mut stats = TournamentStats::new();
    stats.record(Phase::AFirst, Outcome::Draw);
    stats.record(Phase::BFirst, Outcome::Other(0.3));
    assert_eq!(stats.as_tuple(), (0, 0, 2));
}

#[test]
fn test_score_and_win_rate() {
    let stats = TournamentStats {
        wins_a: 3,
        wins_b: 1,
        draws: 2,
    };
    assert_eq!(stats.total_games(), 6);
    assert!((stats.score_a() - 4.0 / 6.0).abs() < 1e-9);
    assert_eq!(stats.win_rate_a(), Some(0.75));
    assert_eq!(TournamentStats::new().win_rate_a(), None);
    assert_eq!(TournamentStats::new().score_a(), 0.5);
}

#[test]
fn test_display() {
    let stats = TournamentStats {
        wins_a: 2,
        wins_b: 0,
        draws: 4,
    };
    assert_eq!(stats.to_string(), "2-0-4");
}
