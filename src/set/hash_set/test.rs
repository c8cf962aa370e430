use super::*;

#[test]
fn new_is_empty() {
    let set: HashSet<i32> = HashSet::new();
    assert!(set.is_empty());
    assert!(!set.contains(&1));
}

#[test]
fn conj_then_contains() {
    let set = HashSet::new().conj(1).conj(2).conj(3);

    assert!(set.contains(&1));
    assert!(set.contains(&2));
    assert!(!set.contains(&4));
    assert_eq!(set.size(), 3);
}

#[test]
fn conj_is_idempotent_on_size() {
    let set = HashSet::new().conj(1).conj(1);
    assert_eq!(set.size(), 1);
}

#[test]
fn disj_removes_element() {
    let set = HashSet::new().conj(1).conj(2);
    let without_one = set.disj(&1);

    assert!(!without_one.contains(&1));
    assert!(without_one.contains(&2));
    assert_eq!(set.size(), 2, "disj must not mutate the original");
}

#[test]
fn from_list_round_trips_ignoring_order() {
    let set = HashSet::<i32>::from_elements(vec![3, 1, 2, 1]);
    let mut back: Vec<i32> = set.to_list().into_iter().copied().collect();
    back.sort_unstable();

    assert_eq!(back, vec![1, 2, 3]);
}

#[test]
fn update_adds_every_element_of_an_iterable() {
    let set = HashSet::new().conj(1).conj(2);
    let updated = set.update(vec![2, 3, 4]);

    for e in [1, 2, 3, 4] {
        assert!(updated.contains(&e));
    }
    assert_eq!(updated.size(), 4);
    assert_eq!(set.size(), 2, "update must not mutate the original");
}

#[test]
fn union_contains_elements_from_both() {
    let a: HashSet<i32> = HashSet::from_elements(vec![1, 2, 3]);
    let b: HashSet<i32> = HashSet::from_elements(vec![3, 4, 5]);
    let u = a.union(&b);

    for e in [1, 2, 3, 4, 5] {
        assert!(u.contains(&e));
    }
    assert_eq!(u.size(), 5);
}

#[test]
fn intersection_keeps_only_shared_elements() {
    let a: HashSet<i32> = HashSet::from_elements(vec![1, 2, 3]);
    let b: HashSet<i32> = HashSet::from_elements(vec![2, 3, 4]);
    let i = a.intersection(&b);

    assert_eq!(i.size(), 2);
    assert!(i.contains(&2));
    assert!(i.contains(&3));
}

#[test]
fn difference_removes_elements_present_in_other() {
    let a: HashSet<i32> = HashSet::from_elements(vec![1, 2, 3]);
    let b: HashSet<i32> = HashSet::from_elements(vec![2, 3]);
    let d = a.difference(&b);

    assert_eq!(d.size(), 1);
    assert!(d.contains(&1));
}

#[test]
fn symmetric_difference_excludes_the_overlap() {
    let a: HashSet<i32> = HashSet::from_elements(vec![1, 2, 3]);
    let b: HashSet<i32> = HashSet::from_elements(vec![3, 4, 5]);
    let sd = a.symmetric_difference(&b);

    let mut elements: Vec<i32> = sd.to_list().into_iter().copied().collect();
    elements.sort_unstable();
    assert_eq!(elements, vec![1, 2, 4, 5]);
}

#[test]
fn subset_superset_disjoint_predicates() {
    let a: HashSet<i32> = HashSet::from_elements(vec![1, 2]);
    let b: HashSet<i32> = HashSet::from_elements(vec![1, 2, 3]);
    let c: HashSet<i32> = HashSet::from_elements(vec![4, 5]);

    assert!(a.is_subset(&b));
    assert!(b.is_superset(&a));
    assert!(a.is_disjoint(&c));
    assert!(!a.is_disjoint(&b));
}
