//! Aggregate statistics over bet records.
//!
//! Three views are produced:
//!
//! - [`PerformanceSummary`]: realized results (counts, profit, ROI, win rate).
//! - [`EvReport`]: expected value against the closing line, grouped by
//!   sportsbook, sport and EV category.
//! - [`PendingReport`]: expected profit on open bets, by day and by book.
//!
//! Bets without a closing line are counted in totals and in the `No CLV`
//! category, but never contribute to an EV average or expected profit.

use std::collections::BTreeMap;
use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::bet::{BetRecord, BetStatus};
use super::ev::{EvAnalysis, EvCategory};
use super::money::{percent_of, Money};

/// Percentage of `numerator` over `denominator`, or `None` for an empty base.
#[must_use]
pub fn compute_percentage(numerator: usize, denominator: usize) -> Option<Decimal> {
    if denominator == 0 {
        return None;
    }
    Some(Decimal::from(numerator) / Decimal::from(denominator) * Decimal::ONE_HUNDRED)
}

/// Win rate over decided bets (`won / (won + lost)`).
#[must_use]
pub fn compute_win_rate(won: usize, lost: usize) -> Option<Decimal> {
    compute_percentage(won, won + lost)
}

/// Realized results for one sportsbook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SportsbookPerformance {
    pub sportsbook: String,
    pub bet_count: usize,
    pub total_stake: Money,
    pub total_profit: Money,
    pub roi: Decimal,
}

/// Realized results over a slice of bets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PerformanceSummary {
    pub total_bets: usize,
    pub winning_bets: usize,
    pub losing_bets: usize,
    pub pending_bets: usize,
    pub total_stake: Money,
    pub total_profit: Money,
    /// Profit as a percentage of stake; zero with no stake.
    pub roi: Decimal,
    /// Percentage over won and lost bets only.
    pub win_rate: Option<Decimal>,
    /// Mean closing line (American) over bets that have one.
    pub avg_clv: Option<Decimal>,
    /// Sorted by profit, best first.
    pub by_sportsbook: Vec<SportsbookPerformance>,
}

impl PerformanceSummary {
    #[must_use]
    pub fn from_bets(bets: &[BetRecord]) -> Self {
        let mut summary = Self {
            total_bets: bets.len(),
            ..Default::default()
        };
        let mut clv_sum = Decimal::ZERO;
        let mut clv_count = 0usize;
        let mut books: HashMap<String, SportsbookPerformance> = HashMap::new();

        for bet in bets {
            match bet.status {
                BetStatus::Won => summary.winning_bets += 1,
                BetStatus::Lost => summary.losing_bets += 1,
                BetStatus::Pending => summary.pending_bets += 1,
                _ => {}
            }
            summary.total_stake += bet.stake;
            summary.total_profit += bet.bet_profit;

            if let Some(clv) = bet.closing_line() {
                clv_sum += Decimal::from(clv.value());
                clv_count += 1;
            }

            let book = books
                .entry(bet.sportsbook.clone())
                .or_insert_with(|| SportsbookPerformance {
                    sportsbook: bet.sportsbook.clone(),
                    ..Default::default()
                });
            book.bet_count += 1;
            book.total_stake += bet.stake;
            book.total_profit += bet.bet_profit;
        }

        summary.roi = percent_of(summary.total_profit, summary.total_stake);
        summary.win_rate = compute_win_rate(summary.winning_bets, summary.losing_bets);
        summary.avg_clv = (clv_count > 0).then(|| clv_sum / Decimal::from(clv_count));

        let mut by_sportsbook: Vec<_> = books
            .into_values()
            .map(|mut book| {
                book.roi = percent_of(book.total_profit, book.total_stake);
                book
            })
            .collect();
        by_sportsbook.sort_by(|a, b| {
            b.total_profit
                .cmp(&a.total_profit)
                .then_with(|| a.sportsbook.cmp(&b.sportsbook))
        });
        summary.by_sportsbook = by_sportsbook;
        summary
    }
}

/// One bet paired with its EV analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzedBet {
    #[serde(flatten)]
    pub bet: BetRecord,
    pub ev: EvAnalysis,
}

impl AnalyzedBet {
    #[must_use]
    pub fn new(bet: BetRecord) -> Self {
        let ev = bet.ev();
        Self { bet, ev }
    }
}

/// EV aggregates for one group of bets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupStats {
    pub name: String,
    pub bet_count: usize,
    pub total_stake: Money,
    pub total_profit: Money,
    /// Realized profit as a percentage of stake.
    pub roi: Decimal,
    /// Bets that have a closing line.
    pub clv_bet_count: usize,
    /// Mean EV fraction over `clv_bet_count` bets.
    pub avg_ev: Option<Decimal>,
    /// Sum over bets with a closing line.
    pub expected_profit: Money,
    pub expected_roi: Decimal,
    #[serde(skip)]
    ev_sum: Decimal,
}

impl GroupStats {
    fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    fn add(&mut self, analyzed: &AnalyzedBet) {
        self.bet_count += 1;
        self.total_stake += analyzed.bet.stake;
        self.total_profit += analyzed.bet.bet_profit;
        if let (Some(ev), Some(expected)) = (analyzed.ev.ev_percent, analyzed.ev.expected_profit) {
            self.clv_bet_count += 1;
            self.ev_sum += ev;
            self.expected_profit += expected;
        }
    }

    fn finish(mut self) -> Self {
        self.roi = percent_of(self.total_profit, self.total_stake);
        self.avg_ev =
            (self.clv_bet_count > 0).then(|| self.ev_sum / Decimal::from(self.clv_bet_count));
        self.expected_roi = percent_of(self.expected_profit, self.total_stake);
        self
    }
}

/// EV analysis over a set of bets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EvReport {
    pub total_bets: usize,
    pub total_stake: Money,
    pub total_profit: Money,
    pub roi: Decimal,
    /// Percentage over won and lost bets.
    pub win_rate: Option<Decimal>,
    /// Bets with a usable closing line.
    pub clv_bet_count: usize,
    pub expected_profit: Money,
    /// Expected profit as a percentage of total stake.
    pub expected_roi: Decimal,
    /// Mean EV fraction over bets with a closing line.
    pub avg_ev: Option<Decimal>,
    /// Percentage of settled closing-line bets that beat the close.
    pub clv_win_rate: Option<Decimal>,
    /// Sorted by realized profit, best first.
    pub by_sportsbook: Vec<GroupStats>,
    /// Sorted by realized profit, best first.
    pub by_sport: Vec<GroupStats>,
    /// Always High, Medium, Low, No CLV, in that order.
    pub by_category: Vec<GroupStats>,
    pub bets: Vec<AnalyzedBet>,
}

impl EvReport {
    #[must_use]
    pub fn from_bets(bets: Vec<BetRecord>) -> Self {
        let analyzed: Vec<AnalyzedBet> = bets.into_iter().map(AnalyzedBet::new).collect();

        let mut report = Self {
            total_bets: analyzed.len(),
            ..Default::default()
        };
        let mut won = 0usize;
        let mut lost = 0usize;
        let mut ev_sum = Decimal::ZERO;
        let mut clv_settled = 0usize;
        let mut clv_beaten = 0usize;

        let mut books: HashMap<String, GroupStats> = HashMap::new();
        let mut sports: HashMap<String, GroupStats> = HashMap::new();
        let mut categories: Vec<GroupStats> = EvCategory::ALL
            .iter()
            .map(|category| GroupStats::named(category.label()))
            .collect();

        for item in &analyzed {
            report.total_stake += item.bet.stake;
            report.total_profit += item.bet.bet_profit;
            match item.bet.status {
                BetStatus::Won => won += 1,
                BetStatus::Lost => lost += 1,
                _ => {}
            }

            if let (Some(ev), Some(expected)) = (item.ev.ev_percent, item.ev.expected_profit) {
                report.clv_bet_count += 1;
                report.expected_profit += expected;
                ev_sum += ev;
                if item.bet.status.is_settled() {
                    clv_settled += 1;
                    if item.ev.beat_clv == Some(true) {
                        clv_beaten += 1;
                    }
                }
            }

            books
                .entry(item.bet.sportsbook.clone())
                .or_insert_with(|| GroupStats::named(item.bet.sportsbook.clone()))
                .add(item);

            if let Some(sport) = item.bet.sport.as_deref().filter(|s| !s.trim().is_empty()) {
                sports
                    .entry(sport.to_string())
                    .or_insert_with(|| GroupStats::named(sport))
                    .add(item);
            }

            let slot = EvCategory::ALL
                .iter()
                .position(|category| *category == item.ev.category)
                .unwrap_or(EvCategory::ALL.len() - 1);
            categories[slot].add(item);
        }

        report.roi = percent_of(report.total_profit, report.total_stake);
        report.win_rate = compute_win_rate(won, lost);
        report.expected_roi = percent_of(report.expected_profit, report.total_stake);
        report.avg_ev =
            (report.clv_bet_count > 0).then(|| ev_sum / Decimal::from(report.clv_bet_count));
        report.clv_win_rate = compute_percentage(clv_beaten, clv_settled);
        report.by_sportsbook = sorted_groups(books);
        report.by_sport = sorted_groups(sports);
        report.by_category = categories.into_iter().map(GroupStats::finish).collect();
        report.bets = analyzed;
        report
    }

    /// Group stats for one category.
    #[must_use]
    pub fn category(&self, category: EvCategory) -> Option<&GroupStats> {
        self.by_category
            .iter()
            .find(|group| group.name == category.label())
    }
}

fn sorted_groups(groups: HashMap<String, GroupStats>) -> Vec<GroupStats> {
    let mut groups: Vec<_> = groups.into_values().map(GroupStats::finish).collect();
    groups.sort_by(|a, b| {
        b.total_profit
            .cmp(&a.total_profit)
            .then_with(|| a.name.cmp(&b.name))
    });
    groups
}

/// Expected profit on open bets for one day or one sportsbook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PendingGroup {
    pub bet_count: usize,
    /// Stake over every bet in the group.
    pub total_stake: Money,
    pub expected_profit: Money,
    pub expected_roi: Decimal,
}

impl PendingGroup {
    fn add(&mut self, item: &AnalyzedBet) {
        self.bet_count += 1;
        self.total_stake += item.bet.stake;
        if let Some(expected) = item.ev.expected_profit {
            self.expected_profit += expected;
        }
    }

    fn finish(mut self) -> Self {
        self.expected_roi = percent_of(self.expected_profit, self.total_stake);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPending {
    /// Event date; `None` for bets with no start time.
    pub date: Option<NaiveDate>,
    #[serde(flatten)]
    pub stats: PendingGroup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SportsbookPending {
    pub sportsbook: String,
    #[serde(flatten)]
    pub stats: PendingGroup,
}

/// Expected profit on pending bets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PendingReport {
    pub total_bets: usize,
    /// Stake on pending bets that have a closing line.
    pub total_stake: Money,
    pub expected_profit: Money,
    /// Expected profit over `total_stake`.
    pub expected_roi: Decimal,
    /// Ascending by date, undated last.
    pub daily: Vec<DailyPending>,
    /// Best expected profit first.
    pub by_sportsbook: Vec<SportsbookPending>,
    pub bets: Vec<AnalyzedBet>,
}

impl PendingReport {
    /// Settled bets in the input are ignored.
    #[must_use]
    pub fn from_bets(bets: Vec<BetRecord>) -> Self {
        let analyzed: Vec<AnalyzedBet> = bets
            .into_iter()
            .filter(|bet| bet.status == BetStatus::Pending)
            .map(AnalyzedBet::new)
            .collect();

        let mut report = Self {
            total_bets: analyzed.len(),
            ..Default::default()
        };
        let mut days: BTreeMap<Option<NaiveDate>, PendingGroup> = BTreeMap::new();
        let mut books: HashMap<String, PendingGroup> = HashMap::new();

        for item in &analyzed {
            if let Some(expected) = item.ev.expected_profit {
                report.total_stake += item.bet.stake;
                report.expected_profit += expected;
            }
            let date = item.bet.event_start_date.map(|dt| dt.date());
            days.entry(date).or_default().add(item);
            books
                .entry(item.bet.sportsbook.clone())
                .or_default()
                .add(item);
        }

        report.expected_roi = percent_of(report.expected_profit, report.total_stake);

        let (dated, undated): (Vec<_>, Vec<_>) =
            days.into_iter().partition(|(date, _)| date.is_some());
        report.daily = dated
            .into_iter()
            .chain(undated)
            .map(|(date, stats)| DailyPending {
                date,
                stats: stats.finish(),
            })
            .collect();

        let mut by_sportsbook: Vec<_> = books
            .into_iter()
            .map(|(sportsbook, stats)| SportsbookPending {
                sportsbook,
                stats: stats.finish(),
            })
            .collect();
        by_sportsbook.sort_by(|a, b| {
            b.stats
                .expected_profit
                .cmp(&a.stats.expected_profit)
                .then_with(|| a.sportsbook.cmp(&b.sportsbook))
        });
        report.by_sportsbook = by_sportsbook;
        report.bets = analyzed;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bet::parse_timestamp;
    use rust_decimal_macros::dec;

    fn bet(sportsbook: &str, status: BetStatus, odds: i32, clv: Option<i32>, stake: Decimal) -> BetRecord {
        BetRecord {
            sportsbook: sportsbook.to_string(),
            status,
            odds,
            clv,
            stake,
            ..Default::default()
        }
    }

    #[test]
    fn test_compute_percentage_zero_denominator_returns_none() {
        assert_eq!(compute_percentage(3, 0), None);
        assert_eq!(compute_percentage(1, 4), Some(dec!(25)));
    }

    #[test]
    fn test_compute_win_rate_ignores_pending() {
        assert_eq!(compute_win_rate(3, 1), Some(dec!(75)));
        assert_eq!(compute_win_rate(0, 0), None);
    }

    #[test]
    fn performance_summary_counts_and_roi() {
        let bets = vec![
            BetRecord {
                bet_profit: dec!(15),
                ..bet("Bovada", BetStatus::Won, 150, Some(120), dec!(10))
            },
            BetRecord {
                bet_profit: dec!(-10),
                ..bet("BetUS", BetStatus::Lost, -110, None, dec!(10))
            },
            bet("Bovada", BetStatus::Pending, 200, Some(180), dec!(20)),
        ];
        let summary = PerformanceSummary::from_bets(&bets);

        assert_eq!(summary.total_bets, 3);
        assert_eq!(summary.winning_bets, 1);
        assert_eq!(summary.losing_bets, 1);
        assert_eq!(summary.pending_bets, 1);
        assert_eq!(summary.total_stake, dec!(40));
        assert_eq!(summary.total_profit, dec!(5));
        assert_eq!(summary.roi, dec!(12.5));
        assert_eq!(summary.win_rate, Some(dec!(50)));
        assert_eq!(summary.avg_clv, Some(dec!(150)));
        assert_eq!(summary.by_sportsbook[0].sportsbook, "Bovada");
        assert_eq!(summary.by_sportsbook[1].total_profit, dec!(-10));
    }

    #[test]
    fn empty_summary_has_no_rates() {
        let summary = PerformanceSummary::from_bets(&[]);
        assert_eq!(summary.roi, Decimal::ZERO);
        assert_eq!(summary.win_rate, None);
        assert_eq!(summary.avg_clv, None);
    }

    #[test]
    fn ev_report_excludes_no_clv_from_averages() {
        let bets = vec![
            bet("Bovada", BetStatus::Won, 150, Some(120), dec!(100)),
            bet("Bovada", BetStatus::Lost, 150, None, dec!(100)),
        ];
        let report = EvReport::from_bets(bets);

        assert_eq!(report.total_bets, 2);
        assert_eq!(report.total_stake, dec!(200));
        assert_eq!(report.clv_bet_count, 1);

        let single = EvAnalysis::from_raw(150, Some(120), dec!(100));
        assert_eq!(report.expected_profit, single.expected_profit.unwrap());
        assert_eq!(report.avg_ev, single.ev_percent);
        assert_eq!(report.clv_win_rate, Some(dec!(100)));

        let no_clv = report.category(EvCategory::NoClv).unwrap();
        assert_eq!(no_clv.bet_count, 1);
        assert_eq!(no_clv.clv_bet_count, 0);
        assert_eq!(no_clv.avg_ev, None);
        assert_eq!(no_clv.expected_profit, Decimal::ZERO);
    }

    #[test]
    fn ev_report_categories_are_fixed_order() {
        let report = EvReport::from_bets(Vec::new());
        let names: Vec<_> = report.by_category.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["High EV", "Medium EV", "Low EV", "No CLV"]);
        assert_eq!(report.avg_ev, None);
        assert_eq!(report.clv_win_rate, None);
    }

    #[test]
    fn ev_report_skips_missing_sport() {
        let mut tennis = bet("Bovada", BetStatus::Won, 150, Some(120), dec!(10));
        tennis.sport = Some("Tennis".into());
        let unknown = bet("Bovada", BetStatus::Won, 150, Some(120), dec!(10));
        let report = EvReport::from_bets(vec![tennis, unknown]);

        assert_eq!(report.by_sport.len(), 1);
        assert_eq!(report.by_sport[0].name, "Tennis");
        assert_eq!(report.by_sportsbook[0].bet_count, 2);
    }

    #[test]
    fn ev_groups_sort_by_realized_profit() {
        // BetUS has the larger expected profit but the smaller realized one.
        let bovada = BetRecord {
            bet_profit: dec!(40),
            ..bet("Bovada", BetStatus::Won, 150, Some(120), dec!(20))
        };
        let betus = BetRecord {
            bet_profit: dec!(-100),
            ..bet("BetUS", BetStatus::Lost, 200, Some(150), dec!(100))
        };
        let report = EvReport::from_bets(vec![betus, bovada]);

        let names: Vec<_> = report.by_sportsbook.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Bovada", "BetUS"]);
        assert!(report.by_sportsbook[1].expected_profit > report.by_sportsbook[0].expected_profit);
        assert_eq!(report.by_sportsbook[0].roi, dec!(200));
        assert_eq!(report.by_sportsbook[1].roi, dec!(-100));
    }

    #[test]
    fn pending_report_uses_clv_bets_for_totals() {
        let mut first = bet("Bovada", BetStatus::Pending, 150, Some(120), dec!(100));
        first.event_start_date = parse_timestamp("2025-06-02T19:00:00");
        let mut second = bet("BetUS", BetStatus::Pending, -110, None, dec!(50));
        second.event_start_date = parse_timestamp("2025-06-01T12:00:00");
        let settled = bet("Bovada", BetStatus::Won, 150, Some(120), dec!(100));

        let report = PendingReport::from_bets(vec![first, second, settled]);

        assert_eq!(report.total_bets, 2);
        assert_eq!(report.total_stake, dec!(100));
        assert_eq!(
            report.expected_profit,
            EvAnalysis::from_raw(150, Some(120), dec!(100))
                .expected_profit
                .unwrap()
        );

        let dates: Vec<_> = report.daily.iter().map(|d| d.date.unwrap().to_string()).collect();
        assert_eq!(dates, ["2025-06-01", "2025-06-02"]);
        assert_eq!(report.daily[0].stats.total_stake, dec!(50));
        assert_eq!(report.daily[0].stats.expected_profit, Decimal::ZERO);

        assert_eq!(report.by_sportsbook[0].sportsbook, "Bovada");
    }

    #[test]
    fn undated_pending_bets_sort_last() {
        let mut dated = bet("Bovada", BetStatus::Pending, 150, None, dec!(10));
        dated.event_start_date = parse_timestamp("2025-06-01");
        let undated = bet("Bovada", BetStatus::Pending, 150, None, dec!(10));
        let report = PendingReport::from_bets(vec![undated, dated]);
        assert!(report.daily[0].date.is_some());
        assert!(report.daily[1].date.is_none());
    }
}
