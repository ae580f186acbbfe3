use super::bins::{Bucket, BucketSet};
use super::model::Quake;
use super::selection::SelectionState;

// ---------------------------------------------------------------------------
// Feature filtering by bucket membership
// ---------------------------------------------------------------------------

/// Features whose magnitude is one of `bucket`'s member values, in feed order.
///
/// Membership is value equality against the stored members rather than a
/// fresh range test, so a magnitude dropped below bucket 0 never shows up.
pub fn filter_by_bucket<'a>(features: &'a [Quake], bucket: &Bucket) -> Vec<&'a Quake> {
    features
        .iter()
        .filter(|q| in_bucket(q, bucket))
        .collect()
}

/// Every feature, unchanged ("show all").
pub fn filter_all(features: &[Quake]) -> Vec<&Quake> {
    features.iter().collect()
}

/// Return indices of features visible under `selection`.
///
/// * `show_all` set → every index
/// * no bucket set (nothing binnable was loaded) → every index
/// * otherwise → members of the selected bucket
pub fn visible_indices(
    features: &[Quake],
    buckets: Option<&BucketSet>,
    selection: &SelectionState,
) -> Vec<usize> {
    let bucket = match buckets.and_then(|b| b.get(selection.index())) {
        Some(bucket) if !selection.show_all => bucket,
        _ => return (0..features.len()).collect(),
    };
    features
        .iter()
        .enumerate()
        .filter(|(_, q)| in_bucket(q, bucket))
        .map(|(i, _)| i)
        .collect()
}

fn in_bucket(quake: &Quake, bucket: &Bucket) -> bool {
    quake
        .binnable_magnitude()
        .is_some_and(|m| bucket.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::bins::build_buckets;
    use crate::data::model::{QuakeDataset, QuakeProperties};

    fn quake(id: &str, mag: f64) -> Quake {
        Quake {
            id: Some(id.to_string()),
            properties: QuakeProperties {
                mag: Some(mag),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn ids(quakes: &[&Quake]) -> Vec<String> {
        quakes.iter().filter_map(|q| q.id.clone()).collect()
    }

    #[test]
    fn bucket_filter_keeps_feed_order() {
        let features = vec![
            quake("a", 2.0),
            quake("b", 1.0),
            quake("c", 2.0),
            quake("d", 3.0),
        ];
        let bucket = Bucket {
            min: 2.0,
            max: 3.0,
            members: vec![2.0, 2.0],
        };
        assert_eq!(ids(&filter_by_bucket(&features, &bucket)), ["a", "c"]);
    }

    #[test]
    fn show_all_is_the_identity() {
        let features = vec![quake("a", 5.0), quake("b", -1.0), quake("c", 0.3)];
        let all = filter_all(&features);
        assert_eq!(ids(&all), ["a", "b", "c"]);
        assert!(all.iter().zip(&features).all(|(x, y)| std::ptr::eq(*x, y)));
    }

    #[test]
    fn paired_feed_end_to_end() {
        // Interleave so the two lowest are not simply the first two features.
        let features: Vec<Quake> = (1..=8)
            .rev()
            .flat_map(|m| {
                let m = m as f64;
                [quake(&format!("{m}a"), m), quake(&format!("{m}b"), m)]
            })
            .collect();
        let ds = QuakeDataset::from_features("test", features);
        let set = build_buckets(&ds.magnitudes).unwrap();
        assert!(set.iter().all(|b| b.len() == 2));

        let mut sel = SelectionState::default();
        let lowest = visible_indices(&ds.features, Some(&set), &sel);
        assert_eq!(lowest, vec![14, 15]);
        assert!(lowest.iter().all(|&i| ds.features[i].magnitude() == Some(1.0)));

        sel.set_show_all(true);
        let all = visible_indices(&ds.features, Some(&set), &sel);
        assert_eq!(all, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn without_buckets_everything_is_visible() {
        let features = vec![quake("a", 0.0), quake("b", -2.0)];
        let sel = SelectionState::default();
        assert_eq!(visible_indices(&features, None, &sel), vec![0, 1]);
    }
}
