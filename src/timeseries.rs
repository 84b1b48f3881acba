// Keepa interleaved (timestamp, value) series
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries(pub Vec<i64>);

impl TimeSeries {
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates (timestamp, value) pairs. A trailing unpaired element is ignored.
    pub fn pairs(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.0.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Last element of the series, i.e. the most recent value.
    pub fn latest(&self) -> Option<i64> {
        self.0.last().copied()
    }

    /// Returns the pair whose timestamp is nearest `target`.
    /// Ties go to the earlier pair.
    pub fn closest(&self, target: i64) -> Option<(i64, i64)> {
        let mut best: Option<((i64, i64), u64)> = None;
        for (time, value) in self.pairs() {
            let diff = time.abs_diff(target);
            match best {
                Some((_, best_diff)) if diff >= best_diff => {}
                _ => best = Some(((time, value), diff)),
            }
        }
        best.map(|(pair, _)| pair)
    }

    /// Value of the sample nearest `target`, or 0 when the series is empty.
    pub fn value_near(&self, target: i64) -> i64 {
        self.closest(target).map(|(_, value)| value).unwrap_or(0)
    }

    pub fn into_vec(self) -> Vec<i64> {
        self.0
    }
}

impl From<Vec<i64>> for TimeSeries {
    fn from(values: Vec<i64>) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closest_picks_minimum_distance() {
        let series = TimeSeries::from(vec![100, 1, 200, 2, 300, 3]);
        assert_eq!(series.closest(190), Some((200, 2)));
        assert_eq!(series.closest(-50), Some((100, 1)));
        assert_eq!(series.closest(10_000), Some((300, 3)));
    }

    #[test]
    fn closest_prefers_first_on_tie() {
        let series = TimeSeries::from(vec![100, 1, 200, 2]);
        assert_eq!(series.closest(150), Some((100, 1)));
    }

    #[test]
    fn closest_on_empty_is_none() {
        let series = TimeSeries::default();
        assert_eq!(series.closest(42), None);
        assert_eq!(series.value_near(42), 0);
    }

    #[test]
    fn closest_handles_extreme_timestamps() {
        let series = TimeSeries::from(vec![i64::MIN, 1, i64::MAX, 2]);
        assert_eq!(series.closest(0), Some((i64::MAX, 2)));
        assert_eq!(series.closest(i64::MIN), Some((i64::MIN, 1)));
        assert_eq!(series.closest(i64::MAX), Some((i64::MAX, 2)));
    }

    #[test]
    fn unpaired_tail_is_ignored() {
        let series = TimeSeries::from(vec![10, 5, 20]);
        assert_eq!(series.pairs().collect::<Vec<_>>(), vec![(10, 5)]);
        assert_eq!(series.closest(20), Some((10, 5)));
    }

    #[test]
    fn latest_is_last_element() {
        assert_eq!(TimeSeries::from(vec![10, 5, 20, 7]).latest(), Some(7));
        assert_eq!(TimeSeries::default().latest(), None);
    }
}
