//! Correctness and invariant tests for histostats
//!
//! These tests verify critical invariants, merge semantics, and edge cases
//! across the statistics, sampling and histogram layers. They complement the
//! unit tests in each module by focusing on properties that must always hold.
//!
//! Run with: cargo test --test correctness

use core::num::NonZeroUsize;

use histostats::histogram::{
    ConfigError, Diagnostic, HistogramBuilder, HistogramConfig, SummaryOptions, Unit,
    UnitAndDirection,
};
use histostats::sampling::{offer, Reservoir};
use histostats::statistics::RunningStatistics;
use histostats::traits::Sketch;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn cap(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

// ============================================================================
// Reservoir Sampler
// ============================================================================

mod reservoir {
    use super::*;

    #[test]
    fn below_capacity_retains_input_in_order() {
        let mut rng = SmallRng::seed_from_u64(5);
        for len in 0..=10usize {
            let mut reservoir = Reservoir::new(cap(10));
            let input: Vec<f64> = (0..len).map(|i| i as f64 * 1.5).collect();
            for &v in &input {
                reservoir.add(v, &mut rng);
            }
            assert_eq!(reservoir.sample(), input.as_slice());
        }
    }

    #[test]
    fn sample_size_never_exceeds_capacity() {
        let capacity = 50;
        let mut rng = SmallRng::seed_from_u64(1);
        let mut s = Reservoir::new(cap(capacity));

        for i in 0..200_000u64 {
            s.add(i, &mut rng);
            assert_eq!(
                s.len(),
                (i as usize + 1).min(capacity),
                "Sample size {} wrong after {} inserts",
                s.len(),
                i + 1
            );
        }
    }

    #[test]
    fn every_position_equally_likely() {
        // With cap k over a stream of n, each item survives with probability k/n.
        let k = 10;
        let n = 100usize;
        let trials = 20_000;
        let mut hits = vec![0usize; n];

        for trial in 0..trials {
            let mut rng = SmallRng::seed_from_u64(trial as u64);
            let mut retained = Vec::new();
            for i in 0..n {
                offer(&mut retained, i as u64 + 1, i, cap(k), &mut rng);
            }
            for &i in &retained {
                hits[i] += 1;
            }
        }

        let expected = trials as f64 * k as f64 / n as f64;
        for (i, &h) in hits.iter().enumerate() {
            let relative_error = (h as f64 - expected).abs() / expected;
            assert!(
                relative_error < 0.1,
                "position {} kept {} times, expected ~{}",
                i,
                h,
                expected
            );
        }
    }

    #[test]
    fn replaying_fill_positions_is_idempotent() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut retained = Vec::new();

        for pass in 0..3 {
            for pos in 1..=5u64 {
                offer(&mut retained, pos, pos * 10 + pass, cap(5), &mut rng);
            }
        }

        assert_eq!(retained, vec![12, 22, 32, 42, 52]);
    }

    #[test]
    fn merge_produces_unbiased_sample() {
        let capacity = 1000;
        let n_per_side = 100_000u64;
        let trials = 50;
        let mut total_from_side2 = 0usize;

        for trial in 0..trials {
            let mut rng1 = SmallRng::seed_from_u64(1000 + trial * 7);
            let mut rng2 = SmallRng::seed_from_u64(2000 + trial * 13);

            let mut s1 = Reservoir::new(cap(capacity));
            let mut s2 = Reservoir::new(cap(capacity));

            for i in 0..n_per_side {
                s1.add(i, &mut rng1);
            }
            for i in n_per_side..(2 * n_per_side) {
                s2.add(i, &mut rng2);
            }

            s1.merge_from(&s2, &mut rng1).unwrap();

            total_from_side2 += s1.sample().iter().filter(|&&x| x >= n_per_side).count();
        }

        let expected = (capacity as f64 * trials as f64) / 2.0;
        let actual = total_from_side2 as f64;
        let relative_error = (actual - expected).abs() / expected;

        assert!(
            relative_error < 0.15,
            "Merged reservoir is biased: {:.1}% of items from side 2",
            (actual / (capacity as f64 * trials as f64)) * 100.0,
        );
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut s1 = Reservoir::new(cap(10));
        let s2 = Reservoir::new(cap(10));

        for i in 0..1000u64 {
            s1.add(i, &mut rng);
        }

        let before = s1.clone();
        s1.merge_from(&s2, &mut rng).unwrap();

        assert_eq!(s1, before);
    }

    #[test]
    fn merge_empty_into_populated() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut empty = Reservoir::new(cap(10));
        let mut populated = Reservoir::new(cap(10));

        for i in 0..1000u64 {
            populated.add(i, &mut rng);
        }

        empty.merge_from(&populated, &mut rng).unwrap();

        assert_eq!(empty.items_seen(), 1000);
        assert_eq!(empty.len(), 10);
    }
}

// ============================================================================
// Running Statistics
// ============================================================================

mod running_stats {
    use super::*;

    #[test]
    fn exact_aggregates() {
        let mut stats = RunningStatistics::new();
        for v in [10.0, 20.0, 30.0, 40.0] {
            stats.add(v);
        }

        assert_eq!(stats.count(), 4);
        assert_eq!(stats.mean(), 25.0);
        assert_eq!(stats.sum(), 100.0);
        assert_eq!(stats.min(), Some(10.0));
        assert_eq!(stats.max(), Some(40.0));
        assert!((stats.variance() - 166.666_666).abs() < 1e-3);
    }

    #[test]
    fn variance_of_zero_and_one_sample_is_zero() {
        let mut stats = RunningStatistics::new();
        assert_eq!(stats.variance(), 0.0);
        assert_eq!(stats.mean(), 0.0);

        stats.add(123.456);
        assert_eq!(stats.variance(), 0.0);
    }

    #[test]
    fn meanlogs_matches_direct_computation() {
        let mut stats = RunningStatistics::new();
        for v in [100.0, 200.0, 300.0, 400.0] {
            stats.add(v);
        }

        assert!(stats.meanlogs_valid());
        assert!((stats.meanlogs().unwrap() - 5.399_684).abs() < 1e-6);
    }

    #[test]
    fn negative_sample_invalidates_meanlogs_permanently() {
        for position in 0..5 {
            let mut stats = RunningStatistics::new();
            for i in 0..5 {
                let v = if i == position { -1.0 } else { 1.0 + i as f64 };
                stats.add(v);
            }
            for v in [1.0, 2.0, 3.0] {
                stats.add(v);
            }

            assert!(!stats.meanlogs_valid(), "negative at {} not sticky", position);
            assert_eq!(stats.meanlogs(), None);
        }
    }

    #[test]
    fn merge_equivalent_to_sequential_add() {
        let data_a = [1.5, 3.7, 2.1, 8.9, 4.3];
        let data_b = [6.2, 7.4, 0.5, 9.1, 5.6];

        let mut sequential = RunningStatistics::new();
        for &v in data_a.iter().chain(data_b.iter()) {
            sequential.add(v);
        }

        let mut sa = RunningStatistics::new();
        let mut sb = RunningStatistics::new();
        for &v in &data_a {
            sa.add(v);
        }
        for &v in &data_b {
            sb.add(v);
        }
        sa.merge(&sb).unwrap();

        assert_eq!(sa.count(), sequential.count());
        assert!((sa.mean() - sequential.mean()).abs() < 1e-10);
        assert!((sa.variance() - sequential.variance()).abs() < 1e-10);
        assert!((sa.sum() - sequential.sum()).abs() < 1e-10);
        assert!((sa.meanlogs().unwrap() - sequential.meanlogs().unwrap()).abs() < 1e-10);
        assert_eq!(sa.min(), sequential.min());
        assert_eq!(sa.max(), sequential.max());
    }

    #[test]
    fn merge_is_commutative() {
        let mut a = RunningStatistics::new();
        let mut b = RunningStatistics::new();

        for v in [1.0, 3.0, 5.0, 7.0, 9.0] {
            a.add(v);
        }
        for v in [2.0, 4.0, 6.0, 8.0, 10.0] {
            b.add(v);
        }

        let mut ab = a.clone();
        ab.merge(&b).unwrap();
        let mut ba = b.clone();
        ba.merge(&a).unwrap();

        assert_eq!(ab.count(), ba.count());
        assert!((ab.mean() - ba.mean()).abs() < 1e-10);
        assert!((ab.variance() - ba.variance()).abs() < 1e-10);
        assert_eq!(ab.min(), ba.min());
        assert_eq!(ab.max(), ba.max());
    }

    #[test]
    fn clear_resets_completely() {
        let mut stats = RunningStatistics::new();
        for v in [1.0, -2.0, 3.0] {
            stats.add(v);
        }

        stats.clear();

        assert!(stats.is_empty());
        assert_eq!(stats.min(), None);
        assert_eq!(stats.max(), None);
        assert!(stats.meanlogs_valid());
    }
}

// ============================================================================
// Histogram Builder
// ============================================================================

mod histogram_builder {
    use super::*;

    #[test]
    fn default_cap_is_ten() {
        let mut hist = HistogramBuilder::with_seed("h", Unit::Ms, 3);
        for v in [1.0, 2.0, 3.0, 4.0] {
            hist.add_sample(v);
        }

        let snapshot = hist.snapshot();
        assert_eq!(snapshot.max_num_sample_values, 10);
        assert_eq!(snapshot.sample_values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn hundred_samples_retain_ten() {
        for seed in 0..50 {
            let mut hist = HistogramBuilder::with_seed("h", Unit::Count, seed);
            for i in 0..100 {
                hist.add_sample(i as f64);
            }

            let snapshot = hist.snapshot();
            assert_eq!(snapshot.sample_values.len(), 10);
            assert!(snapshot
                .sample_values
                .iter()
                .all(|&v| (0.0..=99.0).contains(&v)));
        }
    }

    #[test]
    fn nan_counted_but_never_retained() {
        let mut hist = HistogramBuilder::with_seed("h", Unit::Ms, 3);
        hist.add_sample(f64::NAN);
        hist.add_sample(7.0);

        let snapshot = hist.snapshot();
        assert_eq!(snapshot.num_nans, 1);
        assert_eq!(snapshot.running.as_ref().unwrap().count, 1);
        assert!(snapshot.sample_values.iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn nans_interleaved_past_capacity() {
        let config = HistogramConfig::default().with_max_num_sample_values(4);
        let mut hist =
            HistogramBuilder::with_rng("h", Unit::Ms, &config, SmallRng::seed_from_u64(9))
                .unwrap();

        for i in 0..1000 {
            if i % 3 == 0 {
                hist.add_sample(f64::NAN);
            } else {
                hist.add_sample(i as f64);
            }
        }

        let snapshot = hist.snapshot();
        assert_eq!(snapshot.num_nans, 334);
        assert_eq!(snapshot.running.unwrap().count, 666);
        assert!(snapshot.sample_values.len() <= 4);
        assert!(snapshot.sample_values.iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn zero_cap_is_a_config_error() {
        let config = HistogramConfig::default().with_max_num_sample_values(0);
        let err = HistogramBuilder::with_rng("h", Unit::Ms, &config, SmallRng::seed_from_u64(0))
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroMaxNumSampleValues);
    }

    #[test]
    fn diagnostics_overwrite_by_key() {
        let mut hist = HistogramBuilder::with_seed("h", Unit::Ms, 3);
        hist.add_diagnostic("bots", Diagnostic::generic_set(["\"a\""]));
        hist.add_diagnostic("bots", Diagnostic::generic_set(["\"b\""]));
        hist.add_diagnostic("masters", Diagnostic::generic_set(["\"m\""]));

        let snapshot = hist.snapshot();
        assert_eq!(snapshot.diagnostics.len(), 2);
        assert_eq!(
            snapshot.diagnostics.get("bots"),
            Some(&Diagnostic::generic_set(["\"b\""]))
        );
        assert_eq!(
            snapshot.diagnostics.get("masters"),
            Some(&Diagnostic::generic_set(["\"m\""]))
        );
    }

    #[test]
    fn snapshot_unaffected_by_later_mutation() {
        let mut hist = HistogramBuilder::with_seed("h", Unit::Ms, 3);
        hist.add_sample(1.0);
        let first = hist.snapshot();

        for i in 0..100 {
            hist.add_sample(i as f64);
        }
        hist.set_summary_options(SummaryOptions::none());

        assert_eq!(first.sample_values, vec![1.0]);
        assert_eq!(first.running.unwrap().count, 1);
        assert_eq!(first.summary_options, None);
    }

    #[test]
    fn same_seed_same_sample() {
        let mut a = HistogramBuilder::with_seed("h", Unit::Ms, 77);
        let mut b = HistogramBuilder::with_seed("h", Unit::Ms, 77);
        // Starts at 0.0, which drives the mean of logs to NaN internally
        for i in 0..500 {
            a.add_sample(i as f64);
            b.add_sample(i as f64);
        }

        let (sa, sb) = (a.snapshot(), b.snapshot());
        assert_eq!(sa.sample_values, sb.sample_values);
        assert_eq!(sa.running.as_ref().unwrap().meanlogs, None);
        assert_eq!(sa, sb);
    }

    #[test]
    fn zero_sample_keeps_snapshot_comparable() {
        let mut hist = HistogramBuilder::with_seed("z", Unit::Count, 3);
        hist.add_sample(0.0);
        assert!(hist.running().meanlogs().unwrap().is_infinite());
        assert_eq!(hist.snapshot(), hist.snapshot());

        hist.add_sample(5.0);
        assert!(hist.running().meanlogs_valid());
        assert!(hist.running().meanlogs().unwrap().is_nan());

        let snapshot = hist.snapshot();
        assert_eq!(snapshot.running.as_ref().unwrap().meanlogs, None);
        assert_eq!(snapshot, hist.snapshot());
    }

    #[test]
    fn unit_mapping() {
        assert_eq!(Unit::from_legacy_name("ms"), Unit::Ms);
        assert_eq!(Unit::from_legacy_name("tsMs"), Unit::TsMs);
        assert_eq!(Unit::from_legacy_name("Hz"), Unit::Hertz);
        assert_eq!(Unit::from_legacy_name("n%"), Unit::NPercent);
        assert_eq!(Unit::from_legacy_name("notaunit"), Unit::Unitless);
        assert_eq!(
            Unit::from_legacy_name("ms_smallerIsBetter"),
            Unit::from_legacy_name("ms")
        );
        assert_eq!(
            UnitAndDirection::from_legacy_name("tsMs_smallerIsBetter").to_string(),
            "tsMs_smallerIsBetter"
        );
    }
}

// ============================================================================
// Serialized shape
// ============================================================================

#[cfg(feature = "serde")]
mod serialization {
    use super::*;
    use histostats::histogram::ImprovementDirection;

    #[test]
    fn snapshot_json_shape() {
        let unit = UnitAndDirection::new(Unit::TsMs, ImprovementDirection::SmallerIsBetter);
        let mut hist = HistogramBuilder::with_seed("load", unit, 1);
        hist.set_description("desc");
        hist.add_diagnostic("bots", Diagnostic::generic_set(["\"linux\""]));
        hist.add_sample(f64::NAN);
        for v in [100.0, 200.0, 300.0, 400.0] {
            hist.add_sample(v);
        }

        let json = serde_json::to_value(hist.snapshot()).unwrap();

        assert_eq!(json["name"], "load");
        assert_eq!(json["unit"]["unit"], "TS_MS");
        assert_eq!(json["unit"]["improvementDirection"], "SMALLER_IS_BETTER");
        assert_eq!(json["numNans"], 1);
        assert_eq!(json["maxNumSampleValues"], 10);
        assert_eq!(json["sampleValues"].as_array().unwrap().len(), 4);
        assert_eq!(json["diagnostics"]["bots"]["genericSet"][0], "\"linux\"");
        assert_eq!(json["running"]["count"], 4);
        assert!(json["running"]["meanlogs"].is_f64());
        assert!(json.get("summaryOptions").is_none());
    }

    #[test]
    fn invalid_meanlogs_is_omitted() {
        let mut hist = HistogramBuilder::with_seed("delta", Unit::Unitless, 1);
        hist.add_sample(-3.0);
        hist.add_sample(0.0);

        let json = serde_json::to_value(hist.snapshot()).unwrap();

        assert!(json["running"].get("meanlogs").is_none());
        assert_eq!(json["running"]["variance"], 4.5);
    }

    #[test]
    fn nan_meanlogs_is_omitted() {
        let mut hist = HistogramBuilder::with_seed("zero", Unit::Count, 1);
        hist.add_sample(0.0);
        hist.add_sample(5.0);

        let json = serde_json::to_value(hist.snapshot()).unwrap();

        assert!(json["running"].get("meanlogs").is_none());
        assert_eq!(json["running"]["mean"], 2.5);
        assert!(!serde_json::to_string(&hist.snapshot()).unwrap().contains("null"));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: HistogramConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.max_num_sample_values, 10);

        let config: HistogramConfig =
            serde_json::from_str(r#"{"maxNumSampleValues": 25}"#).unwrap();
        assert_eq!(config.validate().unwrap().get(), 25);
    }
}
