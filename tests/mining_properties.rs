//! Property-based tests for the mining pipeline
//!
//! Random baskets over a small alphabet are mined and the report is checked
//! against a brute-force counter that enumerates every candidate itemset.
//!
//! Properties tested:
//! 1. Exactly the itemsets meeting the threshold are reported, with exact support
//! 2. Every subset of a frequent itemset is frequent with at least its support
//! 3. Rules are disjoint splits of frequent itemsets meeting the confidence bound
//! 4. Lift is the same in both directions of a split
//! 5. The report does not depend on transaction or item order
//! 6. The parallel miner agrees with the sequential one

use basket_miner::{AnalysisReport, MiningEngine, MiningParams, ParallelMiner, Transaction};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

const ALPHABET: [&str; 8] = ["apple", "bread", "cheese", "dates", "eggs", "flour", "grapes", "honey"];

fn baskets() -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec(prop::collection::btree_set(0usize..ALPHABET.len(), 1..6), 0..25).prop_map(
        |rows| {
            rows.into_iter()
                .map(|row| row.into_iter().map(|i| ALPHABET[i].to_string()).collect())
                .collect()
        },
    )
}

/// Count of every itemset over the alphabet, by brute force
fn brute_force_counts(transactions: &[Transaction]) -> HashMap<Vec<String>, u64> {
    let sets: Vec<BTreeSet<&str>> = transactions
        .iter()
        .map(|t| t.iter().map(String::as_str).collect())
        .collect();

    let mut counts = HashMap::new();
    for mask in 1u32..(1 << ALPHABET.len()) {
        let itemset: Vec<&str> = (0..ALPHABET.len())
            .filter(|i| mask & (1 << i) != 0)
            .map(|i| ALPHABET[i])
            .collect();
        let count = sets
            .iter()
            .filter(|set| itemset.iter().all(|item| set.contains(item)))
            .count() as u64;
        if count > 0 {
            let mut labels: Vec<String> = itemset.iter().map(|s| s.to_string()).collect();
            labels.sort();
            counts.insert(labels, count);
        }
    }
    counts
}

fn supports(report: &AnalysisReport) -> HashMap<Vec<String>, f64> {
    report
        .frequent_itemsets
        .iter()
        .map(|entry| (entry.itemset.clone(), entry.support))
        .collect()
}

fn analyze(transactions: &[Transaction], params: &MiningParams) -> AnalysisReport {
    MiningEngine::sequential()
        .analyze(transactions, params)
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_reports_exactly_the_frequent_itemsets(
        transactions in baskets(),
        min_support in 0.05f64..=1.0,
    ) {
        let params = MiningParams::new(min_support, 0.5);
        let report = analyze(&transactions, &params);

        let total = transactions.len();
        let reported = supports(&report);
        if total == 0 {
            prop_assert!(reported.is_empty());
            return Ok(());
        }

        let min_count = params.min_support_count(total);
        let expected: HashMap<Vec<String>, f64> = brute_force_counts(&transactions)
            .into_iter()
            .filter(|(_, count)| *count >= min_count)
            .map(|(itemset, count)| (itemset, count as f64 / total as f64))
            .collect();

        prop_assert_eq!(reported.len(), expected.len());
        for (itemset, support) in &expected {
            let got = reported.get(itemset);
            prop_assert!(got.is_some(), "missing itemset {:?}", itemset);
            prop_assert!((got.copied().unwrap_or_default() - support).abs() < 1e-12);
        }
    }

    #[test]
    fn prop_subsets_of_frequent_itemsets_are_frequent(
        transactions in baskets(),
        min_support in 0.05f64..=0.6,
    ) {
        let report = analyze(&transactions, &MiningParams::new(min_support, 0.5));
        let reported = supports(&report);

        for (itemset, support) in &reported {
            prop_assert!(*support >= min_support - 1e-9);
            for skip in 0..itemset.len() {
                if itemset.len() == 1 {
                    break;
                }
                let subset: Vec<String> = itemset
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != skip)
                    .map(|(_, item)| item.clone())
                    .collect();
                let subset_support = reported.get(&subset);
                prop_assert!(subset_support.is_some(), "subset {:?} of {:?} missing", subset, itemset);
                prop_assert!(subset_support.copied().unwrap_or_default() >= *support);
            }
        }
    }

    #[test]
    fn prop_rules_are_valid_splits(
        transactions in baskets(),
        min_support in 0.05f64..=0.6,
        min_confidence in 0.0f64..=1.0,
    ) {
        let report = analyze(&transactions, &MiningParams::new(min_support, min_confidence));
        let reported = supports(&report);

        for rule in &report.association_rules {
            prop_assert!(!rule.antecedents.is_empty());
            prop_assert!(!rule.consequents.is_empty());
            prop_assert!(rule.antecedents.iter().all(|item| !rule.consequents.contains(item)));
            prop_assert!(rule.confidence >= min_confidence);
            prop_assert!(rule.confidence <= 1.0 + 1e-12);

            let mut union: Vec<String> = rule
                .antecedents
                .iter()
                .chain(&rule.consequents)
                .cloned()
                .collect();
            union.sort();
            let union_support = reported.get(&union).copied();
            prop_assert_eq!(union_support, Some(rule.support));

            prop_assert_eq!(reported.get(&rule.antecedents).copied(), Some(rule.antecedent_support));
            prop_assert!((rule.confidence - rule.support / rule.antecedent_support).abs() < 1e-12);
            prop_assert_eq!(rule.conviction.is_none(), rule.confidence >= 1.0);
        }

        let lifts: Vec<f64> = report.association_rules.iter().map(|r| r.lift).collect();
        prop_assert!(lifts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn prop_lift_is_symmetric(
        transactions in baskets(),
        min_support in 0.05f64..=0.6,
    ) {
        // with no confidence bound both directions of every split are reported
        let report = analyze(&transactions, &MiningParams::new(min_support, 0.0));

        let lift_of: HashMap<(Vec<String>, Vec<String>), f64> = report
            .association_rules
            .iter()
            .map(|rule| ((rule.antecedents.clone(), rule.consequents.clone()), rule.lift))
            .collect();

        for ((antecedents, consequents), lift) in &lift_of {
            let reverse = lift_of.get(&(consequents.clone(), antecedents.clone()));
            prop_assert_eq!(reverse.copied(), Some(*lift));
        }
    }

    #[test]
    fn prop_order_independent(
        transactions in baskets(),
        min_support in 0.05f64..=0.6,
    ) {
        let params = MiningParams::new(min_support, 0.3);
        let first = analyze(&transactions, &params);

        let mut shuffled = transactions.clone();
        shuffled.reverse();
        for basket in &mut shuffled {
            basket.reverse();
        }
        let second = analyze(&shuffled, &params);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_parallel_matches_sequential(
        transactions in baskets(),
        min_support in 0.05f64..=0.6,
    ) {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .build()
            .unwrap();
        let params = MiningParams::new(min_support, 0.3);

        let sequential = analyze(&transactions, &params);
        let parallel = MiningEngine::new(ParallelMiner::new(runtime.handle().clone()))
            .analyze(&transactions, &params)
            .unwrap();

        prop_assert_eq!(sequential, parallel);
    }
}
