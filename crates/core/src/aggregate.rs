//! Derived facts about an order, computed from its association set.
//!
//! Nothing here is cached or persisted. Callers pass the association set as
//! it is *now*; `OrderRepo` re-reads it from the store on every call, so two
//! consecutive calls may disagree if the set changed in between.

use rust_decimal::Decimal;

/// A product as seen from an order: a price and a stock flag.
pub trait OrderLine {
    fn price(&self) -> Decimal;
    fn is_available(&self) -> bool;
}

impl<T: OrderLine + ?Sized> OrderLine for &T {
    fn price(&self) -> Decimal {
        (**self).price()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

/// Sum of the prices of every associated product.
///
/// Exactly `0` for an empty set. The sum is not re-rounded; each addend
/// already carries at most two decimal places.
pub fn total_price<I>(lines: I) -> Decimal
where
    I: IntoIterator,
    I::Item: OrderLine,
{
    lines
        .into_iter()
        .fold(Decimal::ZERO, |acc, line| acc + line.price())
}

/// `true` iff every associated product is available (vacuously for none).
pub fn can_be_fulfilled<I>(lines: I) -> bool
where
    I: IntoIterator,
    I::Item: OrderLine,
{
    lines.into_iter().all(|line| line.is_available())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    struct Line(Decimal, bool);

    impl OrderLine for Line {
        fn price(&self) -> Decimal {
            self.0
        }

        fn is_available(&self) -> bool {
            self.1
        }
    }

    fn line(price: &str, available: bool) -> Line {
        Line(Decimal::from_str(price).unwrap(), available)
    }

    #[test]
    fn total_of_two_products() {
        let lines = [line("1.99", true), line("2.99", true)];
        assert_eq!(total_price(&lines), Decimal::from_str("4.98").unwrap());
    }

    #[test]
    fn total_of_empty_set_is_zero() {
        let lines: [Line; 0] = [];
        assert_eq!(total_price(&lines), Decimal::ZERO);
    }

    #[test]
    fn total_is_not_rerounded() {
        let lines = [line("999.99", true), line("999.99", false), line("0.01", true)];
        assert_eq!(total_price(&lines), Decimal::from_str("1999.99").unwrap());
    }

    #[test]
    fn fulfillable_when_all_available() {
        let lines = [line("1.99", true), line("2.99", true)];
        assert!(can_be_fulfilled(&lines));
    }

    #[test]
    fn not_fulfillable_with_one_unavailable() {
        let lines = [line("1.99", true), line("2.99", true), line("3.99", false)];
        assert!(!can_be_fulfilled(&lines));
    }

    #[test]
    fn empty_set_is_fulfillable() {
        let lines: Vec<Line> = Vec::new();
        assert!(can_be_fulfilled(&lines));
    }
}
