/// Arithmetic mean of a slice of values. `None` for empty input, so callers
/// cannot mistake "no data" for a neutral zero.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation given a pre-computed mean.
/// Returns 0.0 for empty input.
pub fn stddev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

    variance.sqrt()
}

/// Rounds to `decimals` places, halves away from zero.
pub fn round_half_away(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Share of `part` in `total` as a percentage. 0.0 when `total` is zero.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

/// Share of `part` in `total` as a percentage rounded to `decimals` places,
/// halves away from zero. The rounding is done in integers so exact halves
/// are never lost to float error. 0.0 when `total` is zero.
pub fn rounded_pct(part: usize, total: usize, decimals: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let scale = 100 * 10u128.pow(decimals);
    let (part, total) = (part as u128, total as u128);
    let units = (2 * scale * part + total) / (2 * total);
    units as f64 / 10u128.pow(decimals) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty_is_none() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_mean_values() {
        assert_eq!(mean(&[0.5, -0.5, 1.0]), Some(1.0 / 3.0));
    }

    #[test]
    fn test_stddev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(stddev(&values, 5.0), 2.0);
        assert_eq!(stddev(&[], 0.0), 0.0);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_half_away(33.333_333, 1), 33.3);
        assert_eq!(round_half_away(12.25, 1), 12.3);
        assert_eq!(round_half_away(-0.25, 1), -0.3);
        assert_eq!(round_half_away(66.666_666, 1), 66.7);
    }

    #[test]
    fn test_pct() {
        assert_eq!(pct(10, 0), 0.0);
        assert_eq!(pct(1, 4), 25.0);
        assert_eq!(pct(23, 80), 28.75);
        assert_eq!(round_half_away(pct(23, 80), 1), 28.8);
    }

    #[test]
    fn test_rounded_pct_exact_halves_round_up() {
        assert_eq!(rounded_pct(23, 80, 1), 28.8);
        assert_eq!(rounded_pct(41, 80, 1), 51.3);
        assert_eq!(rounded_pct(51, 80, 1), 63.8);
        assert_eq!(rounded_pct(1, 2000, 1), 0.1);
        assert_eq!(rounded_pct(1, 3, 1), 33.3);
        assert_eq!(rounded_pct(2, 3, 1), 66.7);
        assert_eq!(rounded_pct(3, 3, 1), 100.0);
        assert_eq!(rounded_pct(5, 0, 1), 0.0);
    }

    #[test]
    fn test_rounded_pct_sweep_small_totals() {
        for total in 1..=400usize {
            for part in 0..=total {
                let tenths = part * 1000;
                let (floor, rem) = (tenths / total, tenths % total);
                let expected = if 2 * rem >= total { floor + 1 } else { floor };
                assert_eq!(
                    rounded_pct(part, total, 1),
                    expected as f64 / 10.0,
                    "{part}/{total}"
                );
            }
        }
    }
}
