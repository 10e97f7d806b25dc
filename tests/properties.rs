//! Property tests for rate instantiation.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rust_decimal::Decimal;

use rate_card_engine::calculation::{
    calculate_multi_line_trucking_billing, instantiate_rates, split_tiers,
};
use rate_card_engine::models::{
    BookingQuantities, ContractRateMatrix, ContractRateRow, ServiceType, TruckingLineItem,
    UnitType,
};

fn unit_type_strategy() -> impl Strategy<Value = UnitType> {
    prop_oneof![
        Just(UnitType::PerContainer),
        Just(UnitType::PerShipment),
        Just(UnitType::PerBl),
        Just(UnitType::PerSet),
    ]
}

fn mode_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("FCL".to_string()), Just("LCL".to_string()), Just("AIR".to_string())]
}

prop_compose! {
    fn row_strategy(index: usize)(
        unit_type in unit_type_strategy(),
        modes in proptest::collection::btree_map(mode_strategy(), 0i64..10_000_000, 0..3),
        base_rate in proptest::option::of(0i64..10_000_000),
        succeeding in proptest::option::of(0i64..10_000_000),
        threshold in proptest::option::of(0u32..10),
    ) -> ContractRateRow {
        ContractRateRow {
            id: format!("row_{:02}", index),
            particular: format!("Charge {}", index),
            unit_type,
            mode_columns: modes
                .into_iter()
                .map(|(mode, cents)| (mode, Decimal::new(cents, 2)))
                .collect::<BTreeMap<_, _>>(),
            base_rate: base_rate.map(|cents| Decimal::new(cents, 2)),
            succeeding_rate: succeeding.map(|cents| Decimal::new(cents, 2)),
            succeeding_threshold: threshold,
            selection_group: None,
            selection_key: None,
            selection_value: None,
            container_size: None,
            remarks: None,
        }
    }
}

fn matrix_strategy() -> impl Strategy<Value = ContractRateMatrix> {
    (row_strategy(0), row_strategy(1), row_strategy(2), row_strategy(3)).prop_map(
        |(a, b, c, d)| ContractRateMatrix {
            id: "mx_prop".to_string(),
            service_type: ServiceType::Trucking,
            currency: "PHP".to_string(),
            rows: vec![a, b, c, d],
        },
    )
}

prop_compose! {
    fn quantities_strategy()(
        containers in 0u32..50,
        shipments in 0u32..3,
        bls in 0u32..10,
        sets in 0u32..10,
    ) -> BookingQuantities {
        BookingQuantities {
            containers,
            containers_by_size: BTreeMap::new(),
            shipments,
            bls,
            sets,
        }
    }
}

proptest! {
    #[test]
    fn instantiation_is_deterministic(
        matrix in matrix_strategy(),
        quantities in quantities_strategy(),
        mode in mode_strategy(),
    ) {
        let first = instantiate_rates(&matrix, &quantities, &mode, None);
        let second = instantiate_rates(&matrix, &quantities, &mode, None);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_applied_rate_is_consistent(
        matrix in matrix_strategy(),
        quantities in quantities_strategy(),
        mode in mode_strategy(),
    ) {
        for applied in instantiate_rates(&matrix, &quantities, &mode, None) {
            prop_assert!(applied.is_consistent(), "inconsistent line: {:?}", applied);
            prop_assert!(applied.quantity > 0);
            prop_assert_eq!(&applied.currency, "PHP");
        }
    }

    #[test]
    fn zero_quantities_produce_no_lines(
        matrix in matrix_strategy(),
        mode in mode_strategy(),
    ) {
        let applied = instantiate_rates(&matrix, &BookingQuantities::default(), &mode, None);
        prop_assert!(applied.is_empty());
    }

    #[test]
    fn applied_rows_keep_matrix_order(
        matrix in matrix_strategy(),
        quantities in quantities_strategy(),
        mode in mode_strategy(),
    ) {
        let ids: Vec<String> = instantiate_rates(&matrix, &quantities, &mode, None)
            .into_iter()
            .map(|applied| applied.source_row_id)
            .collect();
        let mut sorted = ids.clone();
        sorted.sort();
        prop_assert_eq!(ids, sorted);
    }

    #[test]
    fn tier_split_accounts_for_every_unit(
        quantity in 0u32..10_000,
        threshold in 0u32..100,
        has_succeeding in any::<bool>(),
    ) {
        let split = split_tiers(quantity, threshold, has_succeeding);
        prop_assert_eq!(split.at_base + split.at_succeeding, quantity);
        if has_succeeding {
            prop_assert!(split.at_base <= threshold);
        } else {
            prop_assert_eq!(split.at_succeeding, 0);
        }
    }

    #[test]
    fn multi_line_never_collapses_legs(
        matrix in matrix_strategy(),
        quantities in proptest::collection::vec(0u32..5, 0..6),
        mode in mode_strategy(),
    ) {
        let lines: Vec<TruckingLineItem> = quantities
            .iter()
            .enumerate()
            .map(|(i, quantity)| TruckingLineItem {
                destination: Some(format!("Destination {}", i)),
                truck_type: None,
                quantity: *quantity,
            })
            .collect();

        let combined = calculate_multi_line_trucking_billing(&lines, &matrix, &mode);

        let per_line: usize = lines
            .iter()
            .map(|line| {
                calculate_multi_line_trucking_billing(std::slice::from_ref(line), &matrix, &mode)
                    .len()
            })
            .sum();
        prop_assert_eq!(combined.len(), per_line);
    }
}
