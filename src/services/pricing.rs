use serde::Serialize;

use crate::models::AddOnService;

/// Total charged for a slot: base price plus every selected add-on's surcharge.
/// Saturates at `u32::MAX` instead of overflowing.
pub fn compute_total<'a, I>(base_price: u32, add_ons: I) -> u32
where
    I: IntoIterator<Item = &'a AddOnService>,
{
    add_ons
        .into_iter()
        .fold(base_price, |total, add_on| total.saturating_add(add_on.surcharge()))
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceLine {
    pub label: String,
    pub amount: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceBreakdown {
    pub lines: Vec<PriceLine>,
    pub total: u32,
}

pub fn price_breakdown<'a, I>(base_price: u32, add_ons: I) -> PriceBreakdown
where
    I: IntoIterator<Item = &'a AddOnService> + Clone,
{
    let mut lines = vec![PriceLine {
        label: "Ground Booking".to_string(),
        amount: base_price,
    }];
    lines.extend(add_ons.clone().into_iter().map(|a| PriceLine {
        label: a.label().to_string(),
        amount: a.surcharge(),
    }));
    PriceBreakdown {
        lines,
        total: compute_total(base_price, add_ons),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AddOnService::{CoachingSession, EquipmentRental};

    #[test]
    fn test_no_add_ons() {
        assert_eq!(compute_total(800, &[]), 800);
    }

    #[test]
    fn test_equipment_on_1200_slot() {
        assert_eq!(compute_total(1200, &[EquipmentRental]), 1400);
    }

    #[test]
    fn test_both_on_900_slot() {
        assert_eq!(compute_total(900, &[EquipmentRental, CoachingSession]), 1600);
    }

    #[test]
    fn test_order_independent() {
        for base in [600, 800, 900, 1000, 1200, 1500] {
            let forward = compute_total(base, &[EquipmentRental, CoachingSession]);
            let reverse = compute_total(base, &[CoachingSession, EquipmentRental]);
            assert_eq!(forward, reverse);
            assert_eq!(forward, base + 200 + 500);
        }
    }

    #[test]
    fn test_huge_base_price_saturates() {
        assert_eq!(compute_total(u32::MAX - 100, &[CoachingSession]), u32::MAX);
        assert_eq!(
            compute_total(u32::MAX, &[EquipmentRental, CoachingSession]),
            u32::MAX
        );
    }

    #[test]
    fn test_breakdown_lines_sum_to_total() {
        let breakdown = price_breakdown(1000, &[CoachingSession]);
        assert_eq!(breakdown.lines.len(), 2);
        assert_eq!(breakdown.lines[1].label, "Coaching Session");
        let sum: u32 = breakdown.lines.iter().map(|l| l.amount).sum();
        assert_eq!(sum, breakdown.total);
        assert_eq!(breakdown.total, 1500);
    }
}
