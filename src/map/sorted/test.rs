use super::*;

#[test]
fn new_is_empty() {
    let map: SortedDict<i32, i32> = SortedDict::new();
    assert!(map.is_empty());
    assert!(map.first().is_err());
    assert!(map.last().is_err());
}

#[test]
fn from_mapping_orders_by_key() {
    let map = SortedDict::<i32, &str>::from_pairs(vec![(5, "a"), (3, "b"), (7, "c"), (1, "d"), (4, "e")]);

    assert_eq!(map.first().unwrap(), (&1, &"d"));
    assert_eq!(map.last().unwrap(), (&7, &"c"));

    let keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(keys, vec![1, 3, 4, 5, 7]);
}

#[test]
fn subseq_is_inclusive_start_exclusive_end() {
    let map = SortedDict::<i32, &str>::from_pairs(vec![(5, "a"), (3, "b"), (7, "c"), (1, "d"), (4, "e")]);

    let keys: Vec<i32> = map.subseq(&3, &6).keys().copied().collect();
    assert_eq!(keys, vec![3, 4, 5]);
}

#[test]
fn subseq_after_dissoc_reflects_removal() {
    let map = SortedDict::<i32, &str>::from_pairs(vec![(5, "a"), (3, "b"), (7, "c"), (1, "d"), (4, "e")]);
    let without_five = map.dissoc(&5);

    let keys: Vec<i32> = without_five.subseq(&3, &6).keys().copied().collect();
    assert_eq!(keys, vec![3, 4]);
}

#[test]
fn rsubseq_holds_the_same_range_as_subseq() {
    let map = SortedDict::<i32, &str>::from_pairs(vec![(1, "a"), (2, "b"), (3, "c"), (4, "d")]);

    let sub = map.rsubseq(&1, &4);
    assert_eq!(sub.keys().copied().collect::<Vec<i32>>(), vec![1, 2, 3]);

    let descending: Vec<i32> = sub.rev_iter().map(|(k, _)| *k).collect();
    assert_eq!(descending, vec![3, 2, 1]);
}

#[test]
fn update_folds_pairs_in_with_last_writer_winning() {
    let map = SortedDict::<i32, &str>::from_pairs(vec![(1, "a"), (2, "b")]);
    let updated = map.update(vec![(2, "b2"), (3, "c")]);

    assert_eq!(updated.get(&1), Some(&"a"));
    assert_eq!(updated.get(&2), Some(&"b2"));
    assert_eq!(updated.get(&3), Some(&"c"));
    assert_eq!(updated.size(), 3);
}

#[test]
fn merge_prefers_right_on_conflict() {
    let left = SortedDict::<i32, &str>::from_pairs(vec![(1, "a"), (2, "b")]);
    let right = SortedDict::<i32, &str>::from_pairs(vec![(2, "b2"), (3, "c")]);

    let merged = left.merge(&right);

    assert_eq!(merged.get(&1), Some(&"a"));
    assert_eq!(merged.get(&2), Some(&"b2"));
    assert_eq!(merged.get(&3), Some(&"c"));
    assert_eq!(merged.size(), 3);
}

#[test]
fn merge_key_set_is_the_union_of_both_sides() {
    let left = SortedDict::<i32, i32>::from_pairs((0..50).map(|i| (i, i)));
    let right = SortedDict::<i32, i32>::from_pairs((25..75).map(|i| (i, i + 1)));

    let merged = left.merge(&right);

    assert_eq!(merged.size(), 75);
    assert_eq!(merged.first().unwrap(), (&0, &0));
    assert_eq!(merged.last().unwrap(), (&74, &75));
}

#[test]
fn dissoc_missing_key_is_a_no_op() {
    let map = SortedDict::<i32, &str>::from_pairs(vec![(1, "a"), (2, "b")]);
    let same = map.dissoc(&99);

    assert_eq!(same, map);
}

#[test]
fn ascending_insertion_order_stays_balanced() {
    let mut map = SortedDict::new();

    for i in 0..500 {
        map.assoc_mut(i, i);
    }

    assert_eq!(map.size(), 500);
    assert_eq!(map.first().unwrap(), (&0, &0));
    assert_eq!(map.last().unwrap(), (&499, &499));

    let keys: Vec<i32> = map.keys().copied().collect();
    let mut sorted_keys = keys.clone();
    sorted_keys.sort_unstable();
    assert_eq!(keys, sorted_keys, "in-order traversal must already be ascending");
}

#[test]
fn remove_every_key_one_at_a_time() {
    let mut map = SortedDict::new();

    for i in 0..200 {
        map.assoc_mut(i, i * 2);
    }

    for i in 0..200 {
        assert!(map.dissoc_mut(&i));
        assert_eq!(map.get(&i), None);
    }

    assert!(map.is_empty());
}

#[test]
fn original_map_unaffected_by_assoc_or_dissoc() {
    let map = SortedDict::<i32, &str>::from_pairs(vec![(1, "a"), (2, "b")]);
    let _ = map.assoc(3, "c");
    let _ = map.dissoc(&1);

    assert_eq!(map.size(), 2);
    assert_eq!(map.get(&1), Some(&"a"));
}

#[quickcheck_macros::quickcheck]
fn in_order_iteration_is_always_ascending(keys: Vec<i32>) -> bool {
    let map = SortedDict::<i32, ()>::from_pairs(keys.into_iter().map(|k| (k, ())));
    let collected: Vec<i32> = map.keys().copied().collect();

    collected.windows(2).all(|w| w[0] < w[1])
}

#[quickcheck_macros::quickcheck]
fn first_and_last_bound_every_key(keys: Vec<i32>) -> bool {
    if keys.is_empty() {
        return true;
    }

    let map = SortedDict::<i32, ()>::from_pairs(keys.iter().copied().map(|k| (k, ())));
    let min = *keys.iter().min().unwrap();
    let max = *keys.iter().max().unwrap();

    map.first().unwrap().0 == &min && map.last().unwrap().0 == &max
}
