//! Property-based tests for configuration merging.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat};
use crate::person::FellowAllocationRule;
use proptest::prelude::*;

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(prop::sample::select(vec![
            FellowAllocationRule::Strict,
            FellowAllocationRule::Accommodation,
        ])),
        prop::option::of(1u64..3600),
        prop::option::of(prop::sample::select(vec![
            OutputFormat::Table,
            OutputFormat::Json,
            OutputFormat::Csv,
        ])),
        prop::option::of("[a-z]{1,12}\\.sqlite"),
    )
        .prop_map(
            |(fellow_rule, maximum_lock_wait_seconds, output_format, state_file)| Config {
                fellow_rule,
                maximum_lock_wait_seconds,
                output_format,
                state_file,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        .. ProptestConfig::default()
    })]

    // Every field set in the higher source wins, unset fields fall through
    #[test]
    fn merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(merged.fellow_rule, high.fellow_rule.or(low.fellow_rule));
        prop_assert_eq!(
            merged.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(merged.output_format, high.output_format.or(low.output_format));
        prop_assert_eq!(merged.state_file, high.state_file.or(low.state_file));
    }

    // Merging is idempotent
    #[test]
    fn merge_idempotent(base in config_strategy(), source in config_strategy()) {
        let mut once = base.clone();
        ConfigMerger::merge_into(&mut once, &source);
        let mut twice = once.clone();
        ConfigMerger::merge_into(&mut twice, &source);
        prop_assert_eq!(once, twice);
    }
}
