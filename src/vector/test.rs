use super::*;

#[test]
fn new_is_empty() {
    let list: IndexedList<i32> = IndexedList::new();
    assert!(list.is_empty());
    assert_eq!(list.size(), 0);
    assert!(list.nth(0).is_err());
}

#[test]
fn conj_then_nth() {
    let list = IndexedList::new().conj(10).conj(20).conj(30);

    assert_eq!(list.nth(0), Ok(&10));
    assert_eq!(list.nth(1), Ok(&20));
    assert_eq!(list.nth(2), Ok(&30));
    assert_eq!(list.size(), 3);
}

#[test]
fn negative_index_counts_from_the_end() {
    let list = IndexedList::new().conj(10).conj(20).conj(30);

    assert_eq!(list.nth(-1), Ok(&30));
    assert_eq!(list.nth(-3), Ok(&10));
    assert!(list.nth(-4).is_err());
}

#[test]
fn nth_out_of_range_reports_index_and_length() {
    let list = IndexedList::new().conj(1).conj(2);
    let err = list.nth(5).unwrap_err();
    assert_eq!(err, CollectionError::IndexOutOfRange { index: 5, length: 2 });
}

#[test]
fn assoc_replaces_a_single_slot_without_disturbing_others() {
    let list = IndexedList::new().conj(1).conj(2).conj(3);
    let replaced = list.assoc(1, 99).unwrap();

    assert_eq!(replaced.nth(0), Ok(&1));
    assert_eq!(replaced.nth(1), Ok(&99));
    assert_eq!(replaced.nth(2), Ok(&3));
    assert_eq!(list.nth(1), Ok(&2), "original list must be unaffected");
}

#[test]
fn assoc_out_of_range_is_an_error() {
    let list = IndexedList::new().conj(1);
    assert!(list.assoc(5, 0).is_err());
}

#[test]
fn scenario_conj_assoc_pop_across_the_tail_and_trie_boundary() {
    let mut list: IndexedList<i32> = IndexedList::new();
    for i in 0..100 {
        list = list.conj(i);
    }
    assert_eq!(list.size(), 100);

    let list = list.assoc(50, -1).unwrap();
    assert_eq!(list.nth(50), Ok(&-1));
    assert_eq!(list.nth(49), Ok(&49));
    assert_eq!(list.nth(51), Ok(&51));
    assert_eq!(list.size(), 100);

    let list = list.pop().unwrap();
    assert_eq!(list.nth(98), Ok(&98));
    assert_eq!(list.size(), 99);
}

#[test]
fn conj_grows_past_multiple_trie_levels() {
    let mut list: IndexedList<i32> = IndexedList::new();
    for i in 0..40_000 {
        list = list.conj(i);
    }

    assert_eq!(list.size(), 40_000);
    for i in (0..40_000).step_by(997) {
        assert_eq!(list.nth(i as i64), Ok(&i));
    }
}

#[test]
fn pop_on_empty_list_is_an_error() {
    let list: IndexedList<i32> = IndexedList::new();
    assert_eq!(list.pop().unwrap_err(), CollectionError::EmptyQuery);
}

#[test]
fn pop_then_conj_restores_the_popped_value() {
    let list = IndexedList::new().conj(1).conj(2).conj(3);
    let popped = list.pop().unwrap();
    let restored = popped.conj(*list.nth(2).unwrap());

    assert_eq!(restored, list);
}

#[test]
fn slice_extracts_a_half_open_range() {
    let list: IndexedList<i32> = (0..10).collect();
    let middle = list.slice(2, 5);

    assert_eq!(middle.to_list(), vec![&2, &3, &4]);
}

#[test]
fn slice_with_negative_bounds_counts_from_the_end() {
    let list: IndexedList<i32> = (0..10).collect();
    let tail = list.slice(-3, -1);

    assert_eq!(tail.to_list(), vec![&7, &8]);
}

#[test]
fn iteration_visits_elements_in_order() {
    let list: IndexedList<i32> = (0..50).collect();
    let collected: Vec<i32> = list.iter().copied().collect();
    let expected: Vec<i32> = (0..50).collect();
    assert_eq!(collected, expected);
}

#[test]
fn from_iterator_matches_repeated_conj() {
    let from_iter: IndexedList<i32> = (0..200).collect();

    let mut via_conj = IndexedList::new();
    for i in 0..200 {
        via_conj = via_conj.conj(i);
    }

    assert_eq!(from_iter, via_conj);
}

#[quickcheck_macros::quickcheck]
fn conj_then_nth_returns_the_pushed_value(values: Vec<i32>, extra: i32) -> bool {
    let list: IndexedList<i32> = values.into_iter().collect();
    let grown = list.conj(extra);
    grown.nth(grown.size() as i64 - 1) == Ok(&extra)
}

#[quickcheck_macros::quickcheck]
fn assoc_then_nth_returns_the_assigned_value(values: Vec<i32>, replacement: i32) -> bool {
    if values.is_empty() {
        return true;
    }

    let list: IndexedList<i32> = values.into_iter().collect();
    let i = (list.size() / 2) as i64;
    let updated = list.assoc(i, replacement).unwrap();
    updated.nth(i) == Ok(&replacement)
}

#[quickcheck_macros::quickcheck]
fn pop_then_conj_of_the_last_element_round_trips(values: Vec<i32>) -> bool {
    if values.is_empty() {
        return true;
    }

    let list: IndexedList<i32> = values.into_iter().collect();
    let last = *list.nth(list.size() as i64 - 1).unwrap();
    let restored = list.pop().unwrap().conj(last);
    restored == list
}
