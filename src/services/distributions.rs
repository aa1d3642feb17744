//! Satisfaction and source distributions.
//!
//! Both breakdowns are derived from the actual feedback collection. The
//! satisfaction bands bucket each rated record by its per-record average;
//! the source breakdown groups records by submission channel.

use crate::api::DistributionSlice;
use crate::models::{FeedbackRecord, FeedbackSource};
use crate::services::ratings::{average_rating, round1};

/// Satisfaction band labels, most satisfied first.
const SATISFACTION_BANDS: [&str; 5] = [
    "Very Satisfied",
    "Satisfied",
    "Neutral",
    "Dissatisfied",
    "Very Dissatisfied",
];

fn band_index(avg: f64) -> usize {
    if avg >= 4.5 {
        0
    } else if avg >= 3.5 {
        1
    } else if avg >= 2.5 {
        2
    } else if avg >= 1.5 {
        3
    } else {
        4
    }
}

fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        round1(count as f64 / total as f64 * 100.0)
    }
}

/// Bucket rated records into the five satisfaction bands.
///
/// Records with an empty ratings list carry no opinion and are excluded from
/// the denominator. The five bands are always present, in fixed order, so
/// the chart shape is stable even for an empty collection.
pub fn satisfaction_distribution(feedback: &[FeedbackRecord]) -> Vec<DistributionSlice> {
    let mut counts = [0usize; 5];
    let mut total = 0usize;

    for record in feedback {
        if record.ratings.is_empty() {
            continue;
        }
        counts[band_index(average_rating(&record.ratings))] += 1;
        total += 1;
    }

    SATISFACTION_BANDS
        .iter()
        .zip(counts.iter())
        .map(|(label, &count)| DistributionSlice {
            label: (*label).to_string(),
            count,
            percent: percent_of(count, total),
        })
        .collect()
}

/// Group records by submission channel.
///
/// Known sources appear in fixed display order; records without a source are
/// grouped under a trailing "Unknown" slice, which is omitted when empty.
pub fn source_distribution(feedback: &[FeedbackRecord]) -> Vec<DistributionSlice> {
    let total = feedback.len();
    let mut slices: Vec<DistributionSlice> = FeedbackSource::all()
        .iter()
        .map(|source| {
            let count = feedback.iter().filter(|r| r.source == Some(*source)).count();
            DistributionSlice {
                label: source.label().to_string(),
                count,
                percent: percent_of(count, total),
            }
        })
        .collect();

    let unknown = feedback.iter().filter(|r| r.source.is_none()).count();
    if unknown > 0 {
        slices.push(DistributionSlice {
            label: "Unknown".to_string(),
            count: unknown,
            percent: percent_of(unknown, total),
        });
    }

    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FeedbackId;
    use crate::models::RatingEntry;

    fn record(id: i64, source: Option<FeedbackSource>, values: &[f64]) -> FeedbackRecord {
        FeedbackRecord {
            id: FeedbackId::new(id),
            client_id: None,
            form_id: None,
            submitted_at: "2024-01-01T09:00:00Z".parse().unwrap(),
            source,
            ratings: values.iter().copied().map(RatingEntry::new).collect(),
        }
    }

    #[test]
    fn test_satisfaction_bands_always_present() {
        let slices = satisfaction_distribution(&[]);

        assert_eq!(slices.len(), 5);
        assert_eq!(slices[0].label, "Very Satisfied");
        assert_eq!(slices[4].label, "Very Dissatisfied");
        assert!(slices.iter().all(|s| s.count == 0 && s.percent == 0.0));
    }

    #[test]
    fn test_satisfaction_bucketing() {
        let feedback = vec![
            record(1, None, &[5.0]),       // Very Satisfied
            record(2, None, &[4.0]),       // Satisfied
            record(3, None, &[3.0]),       // Neutral
            record(4, None, &[2.0]),       // Dissatisfied
            record(5, None, &[1.0]),       // Very Dissatisfied
            record(6, None, &[4.5, 4.5]),  // Very Satisfied
        ];
        let slices = satisfaction_distribution(&feedback);

        assert_eq!(slices[0].count, 2);
        assert_eq!(slices[1].count, 1);
        assert_eq!(slices[2].count, 1);
        assert_eq!(slices[3].count, 1);
        assert_eq!(slices[4].count, 1);

        let percent_sum: f64 = slices.iter().map(|s| s.percent).sum();
        assert!((percent_sum - 100.0).abs() < 0.5);
    }

    #[test]
    fn test_unrated_records_excluded_from_denominator() {
        let feedback = vec![record(1, None, &[5.0]), record(2, None, &[])];
        let slices = satisfaction_distribution(&feedback);

        assert_eq!(slices[0].count, 1);
        assert_eq!(slices[0].percent, 100.0);
        assert_eq!(slices[4].count, 0);
    }

    #[test]
    fn test_source_distribution_fixed_order() {
        let feedback = vec![
            record(1, Some(FeedbackSource::Email), &[4.0]),
            record(2, Some(FeedbackSource::Website), &[4.0]),
            record(3, Some(FeedbackSource::Website), &[4.0]),
            record(4, None, &[4.0]),
        ];
        let slices = source_distribution(&feedback);

        assert_eq!(slices[0].label, "Website");
        assert_eq!(slices[0].count, 2);
        assert_eq!(slices[0].percent, 50.0);
        assert_eq!(slices[1].label, "Email");
        assert_eq!(slices.last().unwrap().label, "Unknown");
        assert_eq!(slices.last().unwrap().count, 1);
    }

    #[test]
    fn test_source_distribution_empty() {
        let slices = source_distribution(&[]);

        // Known sources with zero counts, no Unknown slice
        assert_eq!(slices.len(), 5);
        assert!(slices.iter().all(|s| s.count == 0 && s.percent == 0.0));
    }
}
