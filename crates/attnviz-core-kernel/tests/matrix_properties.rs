use attnviz_core_kernel::{
    Order, Rgb, Token, TokenValues, color_for, compute_matrix, parse_value, positional_bias,
};
use proptest::prelude::*;

fn token_values() -> impl Strategy<Value = TokenValues> {
    (-1000i64..1000, -1000i64..1000, -1000i64..1000)
        .prop_map(|(a, b, c)| TokenValues::new(a, b, c))
}

fn order3() -> impl Strategy<Value = Order> {
    Just(vec![0usize, 1, 2])
        .prop_shuffle()
        .prop_map(|v| Order::new(&v).unwrap())
}

fn value_at(values: &TokenValues, order: &Order, pos: usize) -> f64 {
    values.get(order.token_at(pos).unwrap()) as f64
}

proptest! {
    #[test]
    fn prop_cells_without_bias(values in token_values(), order in order3()) {
        let m = compute_matrix(&values, &order, false);
        for i in 0..3 {
            for j in 0..3 {
                let expected = value_at(&values, &order, i) * value_at(&values, &order, j);
                prop_assert_eq!(m.get(i, j).unwrap(), expected);
            }
        }
    }

    #[test]
    fn prop_cells_with_bias(values in token_values(), order in order3()) {
        let m = compute_matrix(&values, &order, true);
        for i in 0..3 {
            for j in 0..3 {
                let expected = value_at(&values, &order, i) * value_at(&values, &order, j)
                    + (0.1 * i as f64) * (0.1 * j as f64);
                prop_assert!((m.get(i, j).unwrap() - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn prop_shuffle_without_bias_is_a_relabelling(values in token_values(), order in order3()) {
        let base = compute_matrix(&values, &Order::default(), false);
        let permuted = compute_matrix(&values, &order, false);
        prop_assert!(permuted.is_symmetric());
        prop_assert_eq!(base.sorted_values(), permuted.sorted_values());
    }

    #[test]
    fn prop_max_cell_is_blue(values in token_values(), order in order3(), bias in any::<bool>()) {
        let m = compute_matrix(&values, &order, bias);
        let max = m.max_value().unwrap();
        prop_assume!(max > 0.0);
        prop_assert_eq!(color_for(max, &m), Rgb::BLUE);
        prop_assert_eq!(color_for(0.0, &m), Rgb::WHITE);
    }

    #[test]
    fn prop_parse_value_round_trips_integers(n in any::<i64>()) {
        prop_assert_eq!(parse_value(&n.to_string()), n);
    }

    #[test]
    fn prop_parse_value_never_panics(s in ".*") {
        let _ = parse_value(&s);
    }
}

#[test]
fn test_bias_changes_multiset_for_non_identity() {
    let values = TokenValues::default();
    let base = compute_matrix(&values, &Order::default(), true);

    for perm in attnviz_core_kernel::stats::all_permutations(3) {
        let m = compute_matrix(&values, &perm, true);
        if perm.is_identity() {
            assert_eq!(m.sorted_values(), base.sorted_values());
        } else {
            assert_ne!(
                m.sorted_values(),
                base.sorted_values(),
                "order {} should change the values",
                perm
            );
        }
    }
}

#[test]
fn test_worked_example() {
    let values = TokenValues::from_pairs([(Token::A, 1), (Token::B, 2), (Token::C, 3)]);
    let plain = compute_matrix(&values, &Order::default(), false);
    assert_eq!(
        plain.rows(),
        &[
            vec![1.0, 2.0, 3.0],
            vec![2.0, 4.0, 6.0],
            vec![3.0, 6.0, 9.0]
        ]
    );

    let biased = compute_matrix(&values, &Order::default(), true);
    assert_eq!(biased.get(0, 0), Some(1.0));
    assert!((biased.get(1, 2).unwrap() - 6.02).abs() < 1e-9);
    assert!((positional_bias(1, 2, true) - 0.02).abs() < 1e-12);
    assert_eq!(positional_bias(1, 2, false), 0.0);
}
