use crate::core::types::{Bounds, CostResult};

/// Total monthly cost range across results (`{0, 0}` when empty)
pub(crate) fn total_cost(results: &[CostResult]) -> Bounds {
    results.iter().fold(Bounds::default(), |mut total, result| {
        total.add(&result.cost);
        total
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::catalog;
    use crate::core::engine::calculate;
    use crate::core::settings::default_settings;

    #[test]
    fn empty_results_total_zero() {
        assert_eq!(total_cost(&[]), Bounds::new(0.0, 0.0));
    }

    #[test]
    fn total_equals_sum_of_parts() {
        let catalog = catalog();
        let results = calculate(&default_settings(&catalog), &catalog).unwrap();
        let total = total_cost(&results);
        let min: f64 = results.iter().map(|r| r.cost.min).sum();
        let max: f64 = results.iter().map(|r| r.cost.max).sum();
        assert_eq!(total, Bounds::new(min, max));
    }

    #[test]
    fn total_is_order_independent() {
        let catalog = catalog();
        let mut results = calculate(&default_settings(&catalog), &catalog).unwrap();
        let forward = total_cost(&results);
        results.reverse();
        let backward = total_cost(&results);
        assert!((forward.min - backward.min).abs() < 1e-9);
        assert!((forward.max - backward.max).abs() < 1e-9);
    }

    #[test]
    fn subset_totals() {
        let catalog = catalog();
        let results = calculate(&default_settings(&catalog), &catalog).unwrap();
        let only_first = total_cost(&results[..1]);
        assert_eq!(only_first, results[0].cost);
    }
}
