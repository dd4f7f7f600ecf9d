use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn nums(items: &[i64]) -> Series<i64> {
    Series::new(items.to_vec())
}

#[test]
fn navigation_shares_storage() {
    let s = nums(&[1, 2, 3]);
    let n = s.next();
    assert_eq!(n.first(), Some(2));
    assert_eq!(n.index(), 1);
    assert!(n.same_storage(&s));
    assert_eq!(n.back().first(), Some(1));
}

#[test]
fn navigation_clamps_at_bounds() {
    let s = nums(&[1, 2]);
    assert_eq!(s.back().index(), 0);
    assert_eq!(s.next().next().next().index(), 2);
    assert!(s.tail().is_empty());
    assert_eq!(s.skip(-10).index(), 0);
    assert_eq!(s.skip(10).index(), 2);
}

#[test]
fn copy_detaches_from_cursor_to_end() {
    let s = nums(&[1, 2, 3, 4]).skip(2);
    let c = s.copy(None);
    assert_eq!(c.index(), 0);
    assert_eq!(c.to_vec(), vec![3, 4]);
    assert!(!c.same_storage(&s));
    let _ = c.append([5]);
    assert_eq!(s.to_vec(), vec![3, 4]);
}

#[test]
fn copy_part_limits_length() {
    let s = nums(&[1, 2, 3, 4]).next();
    assert_eq!(s.copy(Some(2)).to_vec(), vec![2, 3]);
    assert_eq!(s.copy(Some(99)).to_vec(), vec![2, 3, 4]);
}

#[test]
fn append_is_visible_through_other_views() {
    let s = nums(&[1]);
    let view = s.next();
    let returned = s.append([2, 3]);
    assert_eq!(returned.index(), 0);
    assert_eq!(view.to_vec(), vec![2, 3]);
}

#[test]
fn insert_positions_after_inserted() {
    let s = nums(&[1, 4]).next();
    let after = s.insert([2, 3]);
    assert_eq!(after.first(), Some(4));
    assert_eq!(s.head().to_vec(), vec![1, 2, 3, 4]);
}

#[test]
fn remove_at_cursor() {
    let s = nums(&[1, 2, 3]).next();
    let r = s.remove(1);
    assert_eq!(r.first(), Some(3));
    assert_eq!(s.head().to_vec(), vec![1, 3]);
    let _ = s.remove(10);
    assert_eq!(s.head().to_vec(), vec![1]);
}

#[test]
fn pick_and_poke_are_one_based_from_cursor() {
    let s = nums(&[10, 20, 30]).next();
    assert_eq!(s.pick(1), Some(20));
    assert_eq!(s.pick(2), Some(30));
    assert_eq!(s.pick(3), None);
    assert_eq!(s.pick(0), None);
    assert!(s.poke(2, 99));
    assert!(!s.poke(3, 0));
    assert!(!s.poke(0, 0));
    assert_eq!(s.head().to_vec(), vec![10, 20, 99]);
}

#[test]
fn cursor_clamped_after_shrink_elsewhere() {
    let s = nums(&[1, 2, 3]);
    let at_tail = s.tail();
    let _ = s.remove(3);
    assert_eq!(at_tail.index(), 0);
    assert!(at_tail.is_empty());
    assert_eq!(at_tail.first(), None);
}

#[test]
fn equality_compares_remaining_elements() {
    assert_eq!(nums(&[0, 1, 2]).next(), nums(&[1, 2]));
    assert_ne!(nums(&[1, 2]), nums(&[1, 2, 3]));
}

proptest! {
    #[test]
    fn skip_keeps_cursor_in_range(items in proptest::collection::vec(any::<i64>(), 0..16), offset in -40i64..40) {
        let s = Series::new(items.clone());
        let moved = s.skip(offset);
        prop_assert!(moved.index() <= items.len());
        prop_assert_eq!(moved.len() + moved.index(), items.len());
    }

    #[test]
    fn copy_len_matches_remaining(items in proptest::collection::vec(any::<i64>(), 0..16), at in 0usize..20) {
        let s = Series::new(items).at(at);
        prop_assert_eq!(s.copy(None).len(), s.len());
        prop_assert_eq!(s.copy(None).index(), 0);
    }
}
