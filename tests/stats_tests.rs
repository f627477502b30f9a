//! Report scenarios over the bundled bet export.

use chrono::NaiveDate;
use linewise::adapter::outbound::file::JsonFileSource;
use linewise::domain::{
    round_currency, BetFilter, BetSource, BetStatus, EvCategory, EvReport, PendingReport,
    PerformanceSummary,
};
use linewise::port::{BetFeed, BetQuery};
use rust_decimal_macros::dec;

const FIXTURE: &str = include_str!("fixtures/bets.json");

fn fixture_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/bets.json")
}

#[test]
fn fixture_statuses_are_normalized() {
    let bets = JsonFileSource::parse(FIXTURE).unwrap();
    let statuses: Vec<_> = bets.iter().map(|bet| bet.status).collect();
    assert_eq!(
        statuses,
        [
            BetStatus::Won,
            BetStatus::Lost,
            BetStatus::Pending,
            BetStatus::Lost,
            BetStatus::Pending,
        ]
    );
    assert_eq!(bets[4].closing_line(), None);
    assert!(bets[3].is_player_prop());
}

#[test]
fn performance_summary_over_everything() {
    let bets = JsonFileSource::parse(FIXTURE).unwrap();
    let summary = PerformanceSummary::from_bets(&bets);

    assert_eq!(summary.total_bets, 5);
    assert_eq!(summary.winning_bets, 1);
    assert_eq!(summary.losing_bets, 2);
    assert_eq!(summary.pending_bets, 2);
    assert_eq!(summary.total_stake, dec!(320));
    assert_eq!(summary.total_profit, dec!(20));
    assert_eq!(summary.roi, dec!(6.25));
    assert_eq!(summary.avg_clv, Some(dec!(60)));
    assert_eq!(summary.by_sportsbook[0].sportsbook, "Bovada");
}

#[test]
fn ev_report_counts_no_clv_bets_only_in_totals() {
    let bets = JsonFileSource::parse(FIXTURE).unwrap();
    let report = EvReport::from_bets(bets);

    assert_eq!(report.total_bets, 5);
    assert_eq!(report.total_stake, dec!(320));
    assert_eq!(report.clv_bet_count, 3);
    assert_eq!(round_currency(report.expected_profit), dec!(21.75));
    assert_eq!(report.clv_win_rate, Some(dec!(100)));

    let counts: Vec<_> = EvCategory::ALL
        .iter()
        .map(|category| report.category(*category).unwrap().bet_count)
        .collect();
    assert_eq!(counts, [1, 1, 1, 2]);

    let no_clv = report.category(EvCategory::NoClv).unwrap();
    assert_eq!(no_clv.avg_ev, None);
    assert_eq!(no_clv.expected_profit, dec!(0));

    // Realized profit decides the order: Bovada +150, Prophet X 0 (open),
    // BetOnline -20, Novig -110.
    let books: Vec<_> = report.by_sportsbook.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(books, ["Bovada", "Prophet X", "BetOnline", "Novig"]);
    assert_eq!(report.by_sportsbook[0].roi, dec!(100));
    assert_eq!(report.by_sportsbook[1].roi, dec!(0));
    assert_eq!(report.by_sportsbook[3].roi, dec!(-100));

    let sports: Vec<_> = report.by_sport.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(sports, ["Basketball", "Hockey", "Soccer"]);
}

#[test]
fn default_filter_drops_pending_and_props() {
    let bets = JsonFileSource::parse(FIXTURE).unwrap();
    let kept = BetFilter::new().apply(bets);
    let ids: Vec<_> = kept.iter().map(|bet| bet.id).collect();
    assert_eq!(ids, [1, 2]);
}

#[test]
fn date_filter_uses_event_time() {
    let bets = JsonFileSource::parse(FIXTURE).unwrap();
    let day = NaiveDate::from_ymd_opt(2025, 3, 2);
    let kept = BetFilter::new()
        .with_pending(true)
        .with_player_props(true)
        .between(day, day)
        .apply(bets);
    let ids: Vec<_> = kept.iter().map(|bet| bet.id).collect();
    assert_eq!(ids, [2]);
}

#[test]
fn pending_report_groups_by_day_with_undated_last() {
    let bets = JsonFileSource::parse(FIXTURE).unwrap();
    let report = PendingReport::from_bets(bets);

    assert_eq!(report.total_bets, 2);
    assert_eq!(report.total_stake, dec!(50));
    assert_eq!(round_currency(report.expected_profit), dec!(3.57));

    let days: Vec<_> = report.daily.iter().map(|day| day.date).collect();
    assert_eq!(days, [NaiveDate::from_ymd_opt(2025, 3, 5), None]);
}

#[tokio::test]
async fn file_feed_applies_query() {
    let feed = JsonFileSource::new(fixture_path());

    let pikkit = feed
        .fetch_bets(&BetQuery::new().with_source(BetSource::Pikkit))
        .await
        .unwrap();
    let ids: Vec<_> = pikkit.iter().map(|bet| bet.id).collect();
    assert_eq!(ids, [2, 5]);

    let prophet = feed
        .fetch_bets(&BetQuery::new().with_sportsbook("ProphetX"))
        .await
        .unwrap();
    assert_eq!(prophet.len(), 1);
    assert_eq!(prophet[0].id, 5);
}
