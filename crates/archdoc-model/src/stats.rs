//! Percentage allocation for the file composition block.

use std::cmp::Reverse;

/// One hundred percent expressed in tenths of a percent.
const TENTHS_TOTAL: u128 = 1000;

/// Allocate one-decimal percentages for `counts`.
///
/// Each share is the floor or ceiling of its exact value in tenths. Leftover
/// tenths go to the largest remainders (earlier entries win ties), so the
/// result sums to exactly 100.0 whenever the total is non-zero. A zero total
/// yields 0.0 for every entry.
pub fn allocate_percentages(counts: &[u64]) -> Vec<f64> {
    let total: u128 = counts.iter().map(|&count| u128::from(count)).sum();
    if total == 0 {
        return vec![0.0; counts.len()];
    }

    let mut tenths = Vec::with_capacity(counts.len());
    let mut remainders = Vec::with_capacity(counts.len());
    for (index, &count) in counts.iter().enumerate() {
        let scaled = u128::from(count) * TENTHS_TOTAL;
        tenths.push(scaled / total);
        remainders.push((index, scaled % total));
    }

    let assigned: u128 = tenths.iter().sum();
    let mut leftover = TENTHS_TOTAL - assigned;
    remainders.sort_by_key(|&(_, remainder)| Reverse(remainder));
    for (index, remainder) in remainders {
        if leftover == 0 || remainder == 0 {
            break;
        }
        tenths[index] += 1;
        leftover -= 1;
    }

    tenths.into_iter().map(|t| t as f64 / 10.0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(values: &[f64]) -> f64 {
        values.iter().sum()
    }

    #[test]
    fn test_exact_shares() {
        assert_eq!(allocate_percentages(&[3, 1]), vec![75.0, 25.0]);
        assert_eq!(allocate_percentages(&[5]), vec![100.0]);
    }

    #[test]
    fn test_zero_total() {
        assert_eq!(allocate_percentages(&[0, 0, 0]), vec![0.0, 0.0, 0.0]);
        assert!(allocate_percentages(&[]).is_empty());
    }

    #[test]
    fn test_zero_count_among_others() {
        assert_eq!(allocate_percentages(&[0, 2, 2]), vec![0.0, 50.0, 50.0]);
    }

    #[test]
    fn test_thirds_sum_to_hundred() {
        let shares = allocate_percentages(&[1, 1, 1]);
        assert_eq!(shares, vec![33.4, 33.3, 33.3]);
        assert!((sum(&shares) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_six_equal_entries_do_not_drift() {
        // Plain rounding would give 16.7 * 6 = 100.2.
        let shares = allocate_percentages(&[1; 6]);
        assert!((sum(&shares) - 100.0).abs() < 1e-9);
        for share in shares {
            assert!(share == 16.6 || share == 16.7, "unexpected share {share}");
        }
    }

    #[test]
    fn test_huge_counts_do_not_overflow() {
        let shares = allocate_percentages(&[u64::MAX, u64::MAX]);
        assert_eq!(shares, vec![50.0, 50.0]);
    }
}
