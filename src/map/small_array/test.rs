use super::*;

#[test]
fn new_is_empty() {
    let map: SmallArrayMap<i32, i32> = SmallArrayMap::new();
    assert!(map.is_empty());
    assert_eq!(map.get(&0), None);
}

#[test]
fn assoc_then_get() {
    let map = SmallArrayMap::<_, _, RcK>::new().assoc("a", 1).unwrap().assoc("b", 2).unwrap();

    assert_eq!(map.get(&"a"), Some(&1));
    assert_eq!(map.get(&"b"), Some(&2));
    assert_eq!(map.size(), 2);
}

#[test]
fn assoc_overwrites_without_growing() {
    let map = SmallArrayMap::<_, _, RcK>::new().assoc("a", 1).unwrap().assoc("a", 2).unwrap();

    assert_eq!(map.get(&"a"), Some(&2));
    assert_eq!(map.size(), 1);
}

#[test]
fn assoc_past_capacity_fails() {
    let mut map = SmallArrayMap::<_, _, RcK>::new();

    for i in 0..CAPACITY {
        map = map.assoc(i, i).unwrap();
    }

    assert_eq!(map.size(), CAPACITY);

    let err = map.assoc(CAPACITY, CAPACITY).unwrap_err();
    assert_eq!(err, CollectionError::CapacityExceeded { capacity: CAPACITY });
}

#[test]
fn assoc_overwrite_at_capacity_still_succeeds() {
    let mut map = SmallArrayMap::<_, _, RcK>::new();

    for i in 0..CAPACITY {
        map = map.assoc(i, i).unwrap();
    }

    let updated = map.assoc(0, 100).unwrap();
    assert_eq!(updated.get(&0), Some(&100));
    assert_eq!(updated.size(), CAPACITY);
}

#[test]
fn dissoc_removes_and_shrinks() {
    let map = SmallArrayMap::<_, _, RcK>::new().assoc("a", 1).unwrap().assoc("b", 2).unwrap();
    let without_a = map.dissoc(&"a");

    assert_eq!(without_a.size(), 1);
    assert_eq!(without_a.get(&"a"), None);
    assert_eq!(map.size(), 2, "dissoc must not mutate the original");
}

#[test]
fn dissoc_missing_key_is_a_no_op() {
    let map = SmallArrayMap::<_, _, RcK>::new().assoc("a", 1).unwrap();
    let same = map.dissoc(&"z");

    assert_eq!(same, map);
}

#[test]
fn from_pairs_rejects_oversized_input() {
    let pairs: Vec<(i32, i32)> = (0..(CAPACITY as i32 + 1)).map(|i| (i, i)).collect();
    assert!(SmallArrayMap::<i32, i32>::from_pairs(pairs).is_err());
}
