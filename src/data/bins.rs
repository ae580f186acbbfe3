use crate::error::EmptyInputError;

use super::quantile::percentile;

/// Number of magnitude buckets the slider steps through.
pub const BUCKET_COUNT: usize = 8;

// ---------------------------------------------------------------------------
// Bucket – one half-open magnitude range and the magnitudes it holds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub min: f64,
    /// Exclusive upper bound; `f64::INFINITY` for the last bucket.
    pub max: f64,
    /// Magnitudes assigned to this bucket, ascending.
    pub members: Vec<f64>,
}

impl Bucket {
    fn empty(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            members: Vec::new(),
        }
    }

    /// Half-open range test used during assignment.
    pub fn covers(&self, magnitude: f64) -> bool {
        magnitude >= self.min && magnitude < self.max
    }

    /// Whether `magnitude` is one of the assigned member values.
    ///
    /// `members` is sorted ascending, so this is a binary search.
    pub fn contains(&self, magnitude: f64) -> bool {
        self.members
            .binary_search_by(|m| m.total_cmp(&magnitude))
            .is_ok()
    }

    pub fn is_unbounded(&self) -> bool {
        self.max.is_infinite()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

// ---------------------------------------------------------------------------
// BucketSet – the fixed 8 buckets derived from one dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BucketSet {
    buckets: Vec<Bucket>,
    dropped: usize,
}

impl BucketSet {
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn get(&self, index: usize) -> Option<&Bucket> {
        self.buckets.get(index)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Magnitudes that fell below bucket 0 and were not assigned anywhere.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bucket> {
        self.buckets.iter()
    }
}

/// Partition `magnitudes` into [`BUCKET_COUNT`] quantile buckets.
///
/// Boundary `k` is the `(k + 1) / 8` percentile, so bucket 0 starts at the
/// 12.5th percentile and bucket 7 holds everything from the maximum upwards.
/// Magnitudes below bucket 0's `min` are counted in [`BucketSet::dropped`]
/// and otherwise ignored.
pub fn build_buckets(magnitudes: &[f64]) -> Result<BucketSet, EmptyInputError> {
    if magnitudes.is_empty() {
        return Err(EmptyInputError);
    }

    let boundaries = (1..=BUCKET_COUNT)
        .map(|i| percentile(magnitudes, i as f64 / BUCKET_COUNT as f64 * 100.0))
        .collect::<Result<Vec<f64>, _>>()?;

    let mut buckets: Vec<Bucket> = (0..BUCKET_COUNT)
        .map(|i| {
            let max = boundaries.get(i + 1).copied().unwrap_or(f64::INFINITY);
            Bucket::empty(boundaries[i], max)
        })
        .collect();

    // Assign in ascending order so member lists do not depend on input order.
    let mut sorted = magnitudes.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut dropped = 0;
    for m in sorted {
        match buckets.iter_mut().find(|b| b.covers(m)) {
            Some(bucket) => bucket.members.push(m),
            None => dropped += 1,
        }
    }

    Ok(BucketSet { buckets, dropped })
}
