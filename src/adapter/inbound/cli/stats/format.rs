//! Formatting and printing functions for statistics output.

use rust_decimal::Decimal;

use crate::adapter::inbound::cli::output;
use crate::domain::stats::{GroupStats, PendingGroup};
use crate::domain::{EvReport, PendingReport, PerformanceSummary};

fn ev_percent(avg_ev: Option<Decimal>) -> String {
    output::percent(avg_ev.map(|ev| ev * Decimal::ONE_HUNDRED), 2)
}

fn signed_percent(value: Decimal) -> String {
    let text = format!("{value:.2}%");
    if value > Decimal::ZERO {
        output::positive(text)
    } else if value < Decimal::ZERO {
        output::negative(text)
    } else {
        text
    }
}

/// Print realized performance.
pub fn print_summary(summary: &PerformanceSummary) {
    output::section("Record");
    output::field("Bets", summary.total_bets);
    output::field(
        "Won / Lost",
        format!("{} / {}", summary.winning_bets, summary.losing_bets),
    );
    output::field("Pending", summary.pending_bets);
    output::field("Win rate", output::percent(summary.win_rate, 1));

    output::section("Profit/Loss");
    output::field("Staked", output::money(summary.total_stake));
    output::field("Profit", output::signed_money(summary.total_profit));
    output::field("ROI", signed_percent(summary.roi));
    output::field(
        "Avg CLV",
        summary
            .avg_clv
            .map_or_else(|| "N/A".to_string(), |clv| format!("{clv:+.0}")),
    );

    if summary.by_sportsbook.is_empty() {
        return;
    }

    output::section("By Sportsbook");
    println!(
        "  {:20} {:>6} {:>12} {:>12} {:>8}",
        "Sportsbook", "Bets", "Staked", "Profit", "ROI"
    );
    println!("  {:─<20} {:─>6} {:─>12} {:─>12} {:─>8}", "", "", "", "", "");
    for book in &summary.by_sportsbook {
        println!(
            "  {:20} {:>6} {:>12} {:>12} {:>7.1}%",
            book.sportsbook,
            book.bet_count,
            output::money(book.total_stake),
            output::money(book.total_profit),
            book.roi
        );
    }
}

fn print_groups(title: &str, groups: &[GroupStats]) {
    if groups.is_empty() {
        return;
    }

    output::section(title);
    println!(
        "  {:20} {:>6} {:>6} {:>12} {:>12} {:>8} {:>9} {:>12} {:>8}",
        "Name", "Bets", "CLV", "Staked", "Profit", "ROI", "Avg EV", "Exp Profit", "Exp ROI"
    );
    println!(
        "  {:─<20} {:─>6} {:─>6} {:─>12} {:─>12} {:─>8} {:─>9} {:─>12} {:─>8}",
        "", "", "", "", "", "", "", "", ""
    );
    for group in groups {
        println!(
            "  {:20} {:>6} {:>6} {:>12} {:>12} {:>7.1}% {:>9} {:>12} {:>7.1}%",
            group.name,
            group.bet_count,
            group.clv_bet_count,
            output::money(group.total_stake),
            output::money(group.total_profit),
            group.roi,
            ev_percent(group.avg_ev),
            output::money(group.expected_profit),
            group.expected_roi
        );
    }
}

/// Print an EV report.
pub fn print_ev_report(report: &EvReport) {
    output::section("Totals");
    output::field("Bets", report.total_bets);
    output::field("Staked", output::money(report.total_stake));
    output::field("Profit", output::signed_money(report.total_profit));
    output::field("ROI", signed_percent(report.roi));
    output::field("Win rate", output::percent(report.win_rate, 1));

    output::section("Expected Value");
    output::field(
        "With CLV",
        format!("{} of {}", report.clv_bet_count, report.total_bets),
    );
    output::field("Avg EV", ev_percent(report.avg_ev));
    output::field("Exp profit", output::signed_money(report.expected_profit));
    output::field("Exp ROI", signed_percent(report.expected_roi));
    output::field("Beat close", output::percent(report.clv_win_rate, 1));

    print_groups("By EV Category", &report.by_category);
    print_groups("By Sportsbook", &report.by_sportsbook);
    print_groups("By Sport", &report.by_sport);
}

fn print_pending_row(name: &str, stats: &PendingGroup) {
    println!(
        "  {:20} {:>6} {:>12} {:>12} {:>7.1}%",
        name,
        stats.bet_count,
        output::money(stats.total_stake),
        output::money(stats.expected_profit),
        stats.expected_roi
    );
}

fn print_pending_header(first: &str) {
    println!(
        "  {:20} {:>6} {:>12} {:>12} {:>8}",
        first, "Bets", "Staked", "Exp Profit", "Exp ROI"
    );
    println!("  {:─<20} {:─>6} {:─>12} {:─>12} {:─>8}", "", "", "", "", "");
}

/// Print expected profit on open bets.
pub fn print_pending_report(report: &PendingReport) {
    output::section("Pending");
    output::field("Open bets", report.total_bets);
    output::field("Staked (CLV)", output::money(report.total_stake));
    output::field("Exp profit", output::signed_money(report.expected_profit));
    output::field("Exp ROI", signed_percent(report.expected_roi));

    if report.total_bets == 0 {
        output::note("No pending bets.");
        return;
    }

    output::section("By Day");
    print_pending_header("Date");
    for day in &report.daily {
        let label = day
            .date
            .map_or_else(|| "undated".to_string(), |date| date.to_string());
        print_pending_row(&label, &day.stats);
    }

    output::section("By Sportsbook");
    print_pending_header("Sportsbook");
    for book in &report.by_sportsbook {
        print_pending_row(&book.sportsbook, &book.stats);
    }
}
