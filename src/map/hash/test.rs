use super::*;

#[test]
fn new_is_empty() {
    let map: HashDict<i32, i32> = HashDict::new();
    assert_eq!(map.size(), 0);
    assert!(map.is_empty());
    assert_eq!(map.get(&0), None);
}

#[test]
fn assoc_then_get() {
    let map = HashDict::new().assoc("a", 1).assoc("b", 2);

    assert_eq!(map.get(&"a"), Some(&1));
    assert_eq!(map.get(&"b"), Some(&2));
    assert_eq!(map.get(&"c"), None);
    assert_eq!(map.size(), 2);
}

#[test]
fn assoc_overwrites_existing_key() {
    let map = HashDict::new().assoc("a", 1).assoc("a", 2);

    assert_eq!(map.get(&"a"), Some(&2));
    assert_eq!(map.size(), 1);
}

/// Re-`assoc`-ing the same key with an equal value must return a map
/// backed by the very same content: no mutation, no new entries.
#[test]
fn assoc_with_equal_value_is_a_no_op() {
    let map = HashDict::new().assoc("a", 1);
    let same = map.assoc("a", 1);

    assert_eq!(map, same);
    assert_eq!(same.size(), 1);
}

#[test]
fn original_map_unaffected_by_assoc() {
    let map = HashDict::new().assoc("a", 1);
    let _other = map.assoc("a", 2);

    assert_eq!(map.get(&"a"), Some(&1));
}

#[test]
fn dissoc_removes_key() {
    let map = HashDict::new().assoc("a", 1).assoc("b", 2);
    let without_a = map.dissoc(&"a");

    assert_eq!(without_a.get(&"a"), None);
    assert_eq!(without_a.get(&"b"), Some(&2));
    assert_eq!(without_a.size(), 1);

    assert_eq!(map.size(), 2, "dissoc must not mutate the original");
}

#[test]
fn dissoc_missing_key_returns_equivalent_map() {
    let map = HashDict::new().assoc("a", 1);
    let same = map.dissoc(&"z");

    assert_eq!(same, map);
}

#[test]
fn survives_many_collisions_at_max_depth() {
    // A hasher that always returns the same value forces every key into a
    // single CollisionNode once the trie bottoms out.
    struct Zero;

    impl core::hash::Hasher for Zero {
        fn finish(&self) -> u64 {
            0
        }
        fn write(&mut self, _bytes: &[u8]) {}
    }

    #[derive(Clone, Default)]
    struct ZeroBuildHasher;

    impl core::hash::BuildHasher for ZeroBuildHasher {
        type Hasher = Zero;

        fn build_hasher(&self) -> Zero {
            Zero
        }
    }

    let mut map: HashDict<i32, i32, archery::RcK, ZeroBuildHasher> =
        HashDict::new_with_hasher(ZeroBuildHasher);

    for i in 0..50 {
        map.assoc_mut(i, i * 2);
    }

    assert_eq!(map.size(), 50);

    for i in 0..50 {
        assert_eq!(map.get(&i), Some(&(i * 2)));
    }

    for i in 0..25 {
        map.dissoc_mut(&i);
    }

    assert_eq!(map.size(), 25);

    for i in 25..50 {
        assert_eq!(map.get(&i), Some(&(i * 2)));
    }
}

#[test]
fn from_pairs_dedups_keeping_last_value() {
    let map = HashDict::<&str, i32>::from_pairs(vec![("a", 1), ("a", 2), ("b", 3)]);

    assert_eq!(map.size(), 2);
    assert_eq!(map.get(&"a"), Some(&2));
}

#[test]
fn from_pairs_bulk_path_matches_iterative_path() {
    let pairs: Vec<(i32, i32)> = (0..2000).map(|i| (i, i * 3)).collect();
    let bulk: HashDict<i32, i32> = HashDict::from_pairs(pairs.clone());

    let mut iterative = HashDict::new();
    for (k, v) in pairs {
        iterative.assoc_mut(k, v);
    }

    assert_eq!(bulk.size(), iterative.size());
    assert_eq!(bulk, iterative);
}

#[test]
fn merge_prefers_right_on_conflict() {
    let left = HashDict::<&str, i32>::from_pairs(vec![("a", 1), ("b", 2)]);
    let right = HashDict::<&str, i32>::from_pairs(vec![("b", 20), ("c", 3)]);

    let merged = left.merge(&right);

    assert_eq!(merged.get(&"a"), Some(&1));
    assert_eq!(merged.get(&"b"), Some(&20));
    assert_eq!(merged.get(&"c"), Some(&3));
    assert_eq!(merged.size(), 3);
}

#[test]
fn merge_size_accounts_for_overlap_exactly() {
    let left = HashDict::<i32, i32>::from_pairs((0..100).map(|i| (i, i)));
    let right = HashDict::<i32, i32>::from_pairs((50..150).map(|i| (i, i + 1)));

    let merged = left.merge(&right);

    assert_eq!(merged.size(), 150);
}

#[test]
fn clear_yields_empty_map() {
    let map = HashDict::<&str, i32>::from_pairs(vec![("a", 1), ("b", 2)]).clear();

    assert!(map.is_empty());
}

#[test]
fn iteration_visits_every_pair_exactly_once() {
    let pairs = vec![("a", 1), ("b", 2), ("c", 3), ("d", 4)];
    let map = HashDict::<&str, i32>::from_pairs(pairs.clone());

    let mut seen: Vec<(&str, i32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    seen.sort();

    let mut expected = pairs;
    expected.sort();

    assert_eq!(seen, expected);
}

#[test]
fn index_panics_on_missing_key() {
    let map = HashDict::new().assoc("a", 1);
    let result = std::panic::catch_unwind(|| map[&"missing"]);
    assert!(result.is_err());
}

#[test]
fn get_checked_reports_key_missing() {
    let map: HashDict<&str, i32> = HashDict::new();
    assert_eq!(map.get_checked(&"a"), Err(CollectionError::KeyMissing));
}

#[test]
fn sync_variant_is_send_and_sync() {
    static_assertions::assert_impl_all!(HashDictSync<i32, i32>: Send, Sync);
}

#[quickcheck_macros::quickcheck]
fn assoc_then_get_roundtrips(pairs: Vec<(i32, i32)>) -> bool {
    let map = HashDict::<i32, i32>::from_pairs(pairs.clone());

    // Every key ends up bound to whichever value its last occurrence gave it.
    pairs.iter().all(|(k, _)| {
        let last_value = pairs.iter().rev().find(|(k2, _)| k2 == k).unwrap().1;
        map.get(k) == Some(&last_value)
    })
}

#[quickcheck_macros::quickcheck]
fn dissoc_then_get_is_always_none(pairs: Vec<(i32, i32)>) -> bool {
    let map = HashDict::<i32, i32>::from_pairs(pairs.clone());

    pairs.iter().all(|(k, _)| {
        let without = map.dissoc(k);
        without.get(k).is_none()
    })
}

#[quickcheck_macros::quickcheck]
fn merge_size_never_exceeds_sum_of_inputs(a: Vec<(i32, i32)>, b: Vec<(i32, i32)>) -> bool {
    let left = HashDict::<i32, i32>::from_pairs(a.clone());
    let right = HashDict::<i32, i32>::from_pairs(b.clone());
    let merged = left.merge(&right);

    merged.size() <= left.size() + right.size()
}
