// Composite: Summing Values
// A single value and a collection of values are both iterated the same way,
// so one `sum` handles any mix of them.

use colored::Colorize;

// =============================================================================
// Milestone 1: Uniform iteration
// =============================================================================

trait ValueContainer {
    fn values(&self) -> Box<dyn Iterator<Item = i64> + '_>;
}

impl ValueContainer for i64 {
    fn values(&self) -> Box<dyn Iterator<Item = i64> + '_> {
        Box::new(std::iter::once(*self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SingleValue(i64);

impl ValueContainer for SingleValue {
    fn values(&self) -> Box<dyn Iterator<Item = i64> + '_> {
        Box::new(std::iter::once(self.0))
    }
}

/// Holds bare numbers, `SingleValue`s or other containers, in push order.
#[derive(Default)]
struct ManyValues(Vec<Box<dyn ValueContainer>>);

impl ManyValues {
    fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, item: impl ValueContainer + 'static) {
        self.0.push(Box::new(item));
    }

    fn with(mut self, item: impl ValueContainer + 'static) -> Self {
        self.push(item);
        self
    }
}

impl ValueContainer for ManyValues {
    fn values(&self) -> Box<dyn Iterator<Item = i64> + '_> {
        Box::new(self.0.iter().flat_map(|item| item.values()))
    }
}

// =============================================================================
// Milestone 2: Sum
// =============================================================================

fn sum(containers: &[&dyn ValueContainer]) -> i64 {
    containers.iter().flat_map(|c| c.values()).sum()
}

// =============================================================================
// Example usage
// =============================================================================

fn main() {
    let single = SingleValue(11);
    let mut many = ManyValues::new();
    many.push(22_i64);
    many.push(33_i64);
    let nested = ManyValues::new().with(SingleValue(4)).with(many).with(5_i64);

    println!("{}", "=== Composite sum ===".bold());
    println!("sum = {}", sum(&[&single, &nested]));
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_mixed_containers() {
        let single = SingleValue(11);
        let mut many = ManyValues::new();
        many.push(22_i64);
        many.push(33_i64);

        assert_eq!(sum(&[&single, &many]), 66);
    }

    #[test]
    fn test_single_value_yields_once() {
        assert_eq!(SingleValue(5).values().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(sum(&[]), 0);
        assert_eq!(sum(&[&ManyValues::new()]), 0);
    }

    #[test]
    fn test_negative_values() {
        let many = ManyValues::new().with(-4_i64).with(10_i64);
        assert_eq!(sum(&[&many, &SingleValue(-6)]), 0);
    }

    #[test]
    fn test_many_values_holds_single_values() {
        let mut many = ManyValues::new();
        many.push(1_i64);
        many.push(SingleValue(2));
        many.push(3_i64);

        assert_eq!(many.values().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(sum(&[&many, &SingleValue(4)]), 10);
    }

    #[test]
    fn test_containers_nest() {
        let inner = ManyValues::new().with(SingleValue(10)).with(20_i64);
        let outer = ManyValues::new().with(inner).with(SingleValue(30)).with(ManyValues::new());

        assert_eq!(outer.values().collect::<Vec<_>>(), vec![10, 20, 30]);
        assert_eq!(sum(&[&outer]), 60);
    }
}
