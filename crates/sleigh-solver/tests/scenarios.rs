// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! End-to-end tests from instance text to the single-number answer.

use sleigh_model::loading::InstanceLoader;
use sleigh_solver::planner::Planner;

/// Loads the instance text and returns the planner's single-number
/// answer: the served-children count, or `-1`.
fn answer(input: &str) -> i64 {
    let model = match InstanceLoader::new().from_str(input) {
        Ok(model) => model,
        Err(_) => return -1,
    };
    Planner::new().plan(&model).value()
}

#[test]
fn test_single_child_is_served() {
    // One factory with stock, one country demanding one domestic
    // delivery, one child wishing for that factory.
    let input = "\
1 1 1
1 1 5
1 0 1
1 1 1
";
    assert_eq!(answer(input), 1);
}

#[test]
fn test_quota_unreachable_without_stock() {
    // As above, but the sole factory has no stock: the quota of one
    // delivery can never be met.
    let input = "\
1 1 1
1 1 0
1 0 1
1 1 1
";
    assert_eq!(answer(input), -1);
}

#[test]
fn test_quota_above_child_count_is_infeasible() {
    // A quota of two deliveries over a single registered child.
    let input = "\
1 1 1
1 1 5
1 0 2
1 1 1
";
    assert_eq!(answer(input), -1);
}

#[test]
fn test_export_cap_blocks_only_assignment() {
    // The child's only wish sits across the border, and the factory's
    // country exports nothing. The child goes without, but the instance
    // stays feasible.
    let input = "\
1 2 1
1 1 1
1 0 0
2 0 0
1 2 1
";
    assert_eq!(answer(input), 0);
}

#[test]
fn test_foreign_deliveries_count_toward_quota() {
    // Country 2 demands one delivery for its child; the only stocked
    // factory is foreign. The cross-border toy satisfies the quota.
    let input = "\
1 2 1
1 1 5
1 5 0
2 0 1
1 2 1
";
    assert_eq!(answer(input), 1);
}

#[test]
fn test_unknown_factory_reference_is_rejected() {
    let input = "\
1 1 1
1 1 5
1 0 0
1 1 99
";
    assert_eq!(answer(input), -1);
}

#[test]
fn test_malformed_header_is_rejected() {
    assert_eq!(answer("1 1\n"), -1);
    assert_eq!(answer("0 1 1\n"), -1);
    assert_eq!(answer(""), -1);
}

#[test]
fn test_answer_stays_in_range() {
    // Three children, two toys of stock: the answer is in [0, 3].
    let input = "\
1 1 3
1 1 2
1 9 0
1 1 1
2 1 1
3 1 1
";
    let value = answer(input);
    assert!((0..=3).contains(&value));
    assert_eq!(value, 2);
}

#[test]
fn test_repeated_runs_agree() {
    let input = "\
2 2 3
1 1 1
2 2 1
1 1 0
2 1 0
1 1 1 2
2 2 2
3 2 1
";
    let first = answer(input);
    let second = answer(input);
    assert_eq!(first, second);
}

#[test]
fn test_allocation_respects_every_constraint() {
    // Mixed instance: stock pressure, a quota, and an export cap.
    let input = "\
2 2 4
1 1 2
2 2 1
1 1 1
2 9 1
1 1 1 2
2 1 1
3 2 2
4 2 1
";
    let model = InstanceLoader::new().from_str(input).unwrap();
    let outcome = Planner::new().plan(&model);
    let allocation = outcome.result().allocation().expect("expected a plan");

    // Reported count matches the allocation.
    assert_eq!(outcome.value(), allocation.satisfied_count() as i64);

    let mut used = vec![0u64; model.num_factories()];
    let mut domestic = vec![0u64; model.num_countries()];
    let mut exported = vec![0u64; model.num_countries()];

    for (child, factory) in allocation.assignments() {
        // Served children got a factory from their own wish-list.
        assert!(model.child_requests(child).contains(&factory));
        used[factory.get()] += 1;
        domestic[model.child_country(child).get()] += 1;
        if model.factory_country(factory) != model.child_country(child) {
            exported[model.factory_country(factory).get()] += 1;
        }
    }

    for i in 0..model.num_factories() {
        assert!(used[i] <= model.factory_capacity(sleigh_model::index::FactoryIndex::new(i)));
    }
    for j in 0..model.num_countries() {
        let country = sleigh_model::index::CountryIndex::new(j);
        assert!(domestic[j] >= model.import_quota(country));
        assert!(exported[j] <= model.export_limit(country));
    }
}

#[test]
fn test_more_stock_never_hurts() {
    let scarce = "\
1 1 3
1 1 1
1 9 0
1 1 1
2 1 1
3 1 1
";
    let plentiful = "\
1 1 3
1 1 3
1 9 0
1 1 1
2 1 1
3 1 1
";
    assert!(answer(plentiful) >= answer(scarce));
}

#[test]
fn test_looser_export_cap_never_hurts() {
    let capped = "\
1 2 2
1 1 1
1 1 0
2 0 0
1 2 1
2 2 1
";
    let open = "\
1 2 2
1 1 1
1 2 0
2 0 0
1 2 1
2 2 1
";
    assert!(answer(open) >= answer(capped));
}

#[test]
fn test_higher_quota_never_helps() {
    let relaxed = "\
1 1 2
1 1 2
1 0 0
1 1 1
2 1 1
";
    let strict = "\
1 1 2
1 1 2
1 0 2
1 1 1
2 1 1
";
    assert!(answer(strict) <= answer(relaxed));
}
