use case_pulse::{
    data::{Dataset, Observation},
    metrics::{delta, series, Field},
};
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

fn dataset(counts: &[(u64, u64)]) -> Dataset {
    let start = NaiveDate::from_ymd_opt(2020, 1, 21).unwrap();
    counts
        .iter()
        .enumerate()
        .map(|(i, &(cases, deaths))| {
            Observation::new(start + Days::new(i as u64), "Vermont", cases, deaths)
        })
        .collect()
}

proptest! {
    #[test]
    fn delta_length_is_one_less(counts in prop::collection::vec((0u64..1_000_000, 0u64..10_000), 1..80)) {
        let series = series::build(&dataset(&counts), "Vermont").unwrap();
        let deltas = delta::deltas(&series);
        prop_assert_eq!(deltas.len(), counts.len().saturating_sub(1));
    }

    #[test]
    fn downward_revisions_are_masked(counts in prop::collection::vec((0u64..1_000, 0u64..100), 2..60)) {
        let series = series::build(&dataset(&counts), "Vermont").unwrap();
        let deltas = delta::deltas(&series);
        for (t, point) in deltas.points().iter().enumerate() {
            let (prev, cur) = (counts[t], counts[t + 1]);
            for (field, before, after) in [
                (Field::Cases, prev.0, cur.0),
                (Field::Deaths, prev.1, cur.1),
            ] {
                match point.get(field) {
                    None => prop_assert!(after < before),
                    Some(v) => {
                        prop_assert!(v >= 0);
                        prop_assert_eq!(v as u64, after - before);
                    }
                }
            }
        }
    }
}
