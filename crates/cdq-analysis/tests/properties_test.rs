//! Property tests for the robust statistics and reducers.

mod common;

use cdq_analysis::outliers::RobustGroupStats;
use cdq_analysis::rollup::MissingAwareReducer;
use cdq_core::config::OutlierConfig;
use cdq_core::AdminLevel;
use proptest::prelude::*;

use common::*;

fn observation() -> impl Strategy<Value = Option<f64>> {
    prop::option::weighted(0.85, (-10_000i32..10_000).prop_map(f64::from))
}

fn observations() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(observation(), 0..40)
}

proptest! {
    #[test]
    fn flags_invariant_under_power_of_two_scaling(values in observations(), k in -8i32..8) {
        let stats = RobustGroupStats::default();
        let factor = 2f64.powi(k);
        let scaled: Vec<Option<f64>> = values.iter().map(|v| v.map(|x| x * factor)).collect();

        let est = stats.estimate(values.iter().copied());
        let est_scaled = stats.estimate(scaled.iter().copied());
        for (v, s) in values.iter().zip(&scaled) {
            prop_assert_eq!(stats.flag(*v, &est), stats.flag(*s, &est_scaled));
        }
    }

    #[test]
    fn mad_non_negative_and_median_within_range(values in observations()) {
        let est = RobustGroupStats::default().estimate(values.iter().copied());
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        prop_assert_eq!(est.observations, present.len());
        prop_assert_eq!(est.is_determinate(), present.len() >= 2);

        if let Some(mad) = est.mad {
            prop_assert!(mad >= 0.0);
        }
        match est.median {
            Some(m) => {
                let lo = present.iter().copied().fold(f64::INFINITY, f64::min);
                let hi = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(lo <= m && m <= hi, "{} not in [{}, {}]", m, lo, hi);
            }
            None => prop_assert!(present.is_empty()),
        }
    }

    #[test]
    fn flags_exist_only_for_present_values(values in observations()) {
        let stats = RobustGroupStats::default();
        let est = stats.estimate(values.iter().copied());
        for v in &values {
            let flag = stats.flag(*v, &est);
            if v.is_none() || !est.is_determinate() {
                prop_assert_eq!(flag, None);
            } else {
                prop_assert!(matches!(flag, Some(0) | Some(1)));
            }
        }
    }

    #[test]
    fn max_never_below_mean(values in observations()) {
        let max = MissingAwareReducer::MAX.reduce(values.iter().copied());
        let mean = MissingAwareReducer::MEAN.reduce(values.iter().copied());
        match (max, mean) {
            (Some(max), Some(mean)) => prop_assert!(max >= mean),
            (None, None) => prop_assert!(values.iter().all(Option::is_none)),
            other => prop_assert!(false, "reducers disagree on emptiness: {:?}", other),
        }
    }

    #[test]
    fn parallel_matches_sequential(
        series in prop::collection::vec(
            (0usize..3, 1u32..=12, [observation(), observation(), observation()]),
            1..30,
        )
    ) {
        let mut ds = empty_dataset();
        for (district, month, values) in &series {
            let name = ["A", "B", "C"][*district];
            push(&mut ds, "N", name, 2023, *month, *values);
        }

        let seq = core_with(OutlierConfig { parallel: Some(false), ..Default::default() });
        let par = core_with(OutlierConfig { parallel: Some(true), ..Default::default() });
        let a = seq.compute_all(&ds, AdminLevel::District).unwrap();
        let b = par.compute_all(&ds, AdminLevel::District).unwrap();
        prop_assert_eq!(a.rows, b.rows);
    }
}
