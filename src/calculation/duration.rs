//! Work duration calculation with threshold-based break deduction.
//!
//! This module turns a start/end pair into net worked minutes. At most one
//! break rule is applied: the one with the highest threshold that the raw
//! elapsed time strictly exceeds.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::models::{BreakRule, DurationResult};

use super::timestamp::parse_timestamp;

/// Computes net worked minutes from two timestamp strings.
///
/// Both values are parsed with [`parse_timestamp`]. An unparsable value or an
/// end before the start yields [`DurationResult::error`].
///
/// # Examples
///
/// ```
/// use worktime_engine::calculation::compute_duration;
/// use worktime_engine::models::BreakRule;
///
/// let rules = [BreakRule::from_hours(6, 0, 30), BreakRule::from_hours(9, 0, 45)];
/// let result = compute_duration("2024-06-03T08:00", "2024-06-03T17:30", &rules);
///
/// assert_eq!(result.raw_minutes, Some(570));
/// assert_eq!(result.net_minutes, Some(540));
/// ```
pub fn compute_duration(start: &str, end: &str, rules: &[BreakRule]) -> DurationResult {
    match (parse_timestamp(start), parse_timestamp(end)) {
        (Some(start), Some(end)) => compute_duration_between(start, end, rules),
        _ => {
            debug!(start, end, "unparsable timestamp");
            DurationResult::error()
        }
    }
}

/// Computes net worked minutes between two parsed instants.
///
/// Raw minutes are the elapsed milliseconds divided by 60000, rounded half
/// up. The deduction is `min(raw - threshold, pause)` of the selected rule,
/// so the result never drops below that rule's threshold.
pub fn compute_duration_between(
    start: NaiveDateTime,
    end: NaiveDateTime,
    rules: &[BreakRule],
) -> DurationResult {
    if end < start {
        debug!(%start, %end, "end precedes start");
        return DurationResult::error();
    }

    let raw_minutes = rounded_minutes(start, end);
    let applied_rule = select_break_rule(raw_minutes, rules);
    let result = DurationResult::computed(raw_minutes, applied_rule);

    debug!(
        raw_minutes,
        break_minutes = result.break_minutes,
        threshold_minutes = applied_rule.map(|rule| rule.threshold_minutes),
        "computed work duration"
    );

    result
}

/// Selects the single break rule that applies to `raw_minutes`.
///
/// Rules are ranked by threshold descending and, for equal thresholds, by
/// pause descending; the first rule whose threshold is strictly below
/// `raw_minutes` wins. The ranking makes the choice independent of the order
/// in which rules are supplied.
pub fn select_break_rule(raw_minutes: i64, rules: &[BreakRule]) -> Option<BreakRule> {
    rules
        .iter()
        .filter(|rule| i64::from(rule.threshold_minutes) < raw_minutes)
        .max_by_key(|rule| (rule.threshold_minutes, rule.pause_minutes))
        .copied()
}

fn rounded_minutes(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let millis = (end - start).num_milliseconds();
    (millis + 30_000).div_euclid(60_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn default_rules() -> Vec<BreakRule> {
        vec![
            BreakRule::from_hours(6, 0, 30),
            BreakRule::from_hours(9, 0, 45),
            BreakRule::from_hours(10, 0, 60),
        ]
    }

    #[test]
    fn test_nine_and_a_half_hours_with_two_rules() {
        let rules = [BreakRule::from_hours(6, 0, 30), BreakRule::from_hours(9, 0, 45)];
        let result = compute_duration("2024-06-03T08:00", "2024-06-03T17:30", &rules);

        assert!(!result.is_error);
        assert_eq!(result.raw_minutes, Some(570));
        assert_eq!(result.break_minutes, 30);
        assert_eq!(result.applied_rule, Some(BreakRule::new(540, 45)));
        assert_eq!(result.net_minutes, Some(540));
    }

    #[test]
    fn test_below_every_threshold_no_deduction() {
        let result = compute_duration("2024-06-03T08:00", "2024-06-03T13:00", &default_rules());
        assert_eq!(result.net_minutes, Some(300));
        assert_eq!(result.applied_rule, None);
    }

    #[test]
    fn test_exactly_at_threshold_no_deduction() {
        let result = compute_duration("2024-06-03T08:00", "2024-06-03T14:00", &default_rules());
        assert_eq!(result.net_minutes, Some(360));
        assert_eq!(result.break_minutes, 0);
    }

    #[test]
    fn test_partial_deduction_just_over_threshold() {
        // 6h10m: 10 minutes over the 6h threshold, pause capped at 10
        let result = compute_duration("2024-06-03T08:00", "2024-06-03T14:10", &default_rules());
        assert_eq!(result.net_minutes, Some(360));
        assert_eq!(result.break_minutes, 10);
    }

    #[test]
    fn test_only_highest_satisfied_rule_applies() {
        // 11h raw: only the 10h rule applies, not 10h + 9h + 6h
        let result = compute_duration("2024-06-03T07:00", "2024-06-03T18:00", &default_rules());
        assert_eq!(result.raw_minutes, Some(660));
        assert_eq!(result.break_minutes, 60);
        assert_eq!(result.net_minutes, Some(600));
    }

    #[test]
    fn test_empty_rules_no_deduction() {
        let result = compute_duration("2024-06-03T08:00", "2024-06-03T18:00", &[]);
        assert_eq!(result.net_minutes, Some(600));
    }

    #[test]
    fn test_zero_duration() {
        let result = compute_duration("2024-06-03T08:00", "2024-06-03T08:00", &default_rules());
        assert_eq!(result.net_minutes, Some(0));
        assert!(!result.is_error);
    }

    #[test]
    fn test_zero_threshold_rule_applies_to_any_positive_duration() {
        let rules = [BreakRule::new(0, 15)];
        let result = compute_duration("2024-06-03T08:00", "2024-06-03T08:05", &rules);
        assert_eq!(result.net_minutes, Some(0));
    }

    #[test]
    fn test_end_before_start_is_error() {
        let result = compute_duration("2024-06-03T17:00", "2024-06-03T08:00", &default_rules());
        assert!(result.is_error);
        assert_eq!(result.net_minutes, None);
    }

    #[test]
    fn test_unparsable_input_is_error() {
        let result = compute_duration("not a date", "2024-06-03T08:00", &default_rules());
        assert!(result.is_error);
        assert_eq!(result.net_minutes, None);
    }

    #[test]
    fn test_overnight_span() {
        let result = compute_duration("2024-06-03T22:00", "2024-06-04T06:00", &default_rules());
        assert_eq!(result.raw_minutes, Some(480));
        assert_eq!(result.net_minutes, Some(450));
    }

    #[test]
    fn test_rounds_half_minute_up() {
        let start = make_datetime("2024-06-03 08:00:00");
        let result = compute_duration_between(start, start + Duration::seconds(90), &[]);
        assert_eq!(result.net_minutes, Some(2));

        let result = compute_duration_between(start, start + Duration::seconds(89), &[]);
        assert_eq!(result.net_minutes, Some(1));
    }

    #[test]
    fn test_equal_thresholds_prefer_larger_pause() {
        let rules = [BreakRule::new(360, 15), BreakRule::new(360, 30)];
        assert_eq!(select_break_rule(420, &rules), Some(BreakRule::new(360, 30)));

        let reversed = [BreakRule::new(360, 30), BreakRule::new(360, 15)];
        assert_eq!(select_break_rule(420, &reversed), Some(BreakRule::new(360, 30)));
    }

    fn rules_strategy() -> impl Strategy<Value = Vec<BreakRule>> {
        prop::collection::vec((0u32..900, 0u32..120), 0..6).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(threshold, pause)| BreakRule::new(threshold, pause))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_net_bounded_by_raw_and_largest_pause(raw in 0i64..2000, rules in rules_strategy()) {
            let start = make_datetime("2024-06-03 06:00:00");
            let result = compute_duration_between(start, start + Duration::minutes(raw), &rules);
            let net = result.net_minutes.unwrap();
            let max_pause = rules.iter().map(|r| i64::from(r.pause_minutes)).max().unwrap_or(0);

            prop_assert!(net <= raw);
            prop_assert!(net >= raw - max_pause);
            prop_assert!(net >= 0);
        }

        #[test]
        fn prop_result_independent_of_rule_order(
            raw in 0i64..2000,
            (rules, shuffled) in rules_strategy()
                .prop_flat_map(|rules| (Just(rules.clone()), Just(rules).prop_shuffle())),
        ) {
            let start = make_datetime("2024-06-03 06:00:00");
            let end = start + Duration::minutes(raw);
            prop_assert_eq!(
                compute_duration_between(start, end, &rules),
                compute_duration_between(start, end, &shuffled)
            );
        }

        #[test]
        fn prop_applied_rule_has_largest_satisfied_threshold(raw in 0i64..2000, rules in rules_strategy()) {
            let best = rules
                .iter()
                .filter(|r| i64::from(r.threshold_minutes) < raw)
                .map(|r| r.threshold_minutes)
                .max();
            prop_assert_eq!(select_break_rule(raw, &rules).map(|r| r.threshold_minutes), best);
        }
    }
}
