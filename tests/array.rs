use core::cell::Cell;

use rstest::rstest;

use dyn_array::{dyn_array, DynArray, GrowExact, OutOfRange, StorageError};

const SLICE: &[usize] = &[1, 2, 3, 4, 5];

#[derive(Debug)]
struct Tracked<'a> {
    value: u32,
    drops: &'a Cell<usize>,
}

impl<'a> Tracked<'a> {
    fn new(value: u32, drops: &'a Cell<usize>) -> Self {
        Self { value, drops }
    }
}

impl Drop for Tracked<'_> {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

fn tracked(count: u32, drops: &Cell<usize>) -> DynArray<Tracked<'_>> {
    (0..count).map(|value| Tracked::new(value, drops)).collect()
}

fn values(arr: &DynArray<Tracked<'_>>) -> Vec<u32> {
    arr.iter().map(|t| t.value).collect()
}

#[test]
fn array_new_empty() {
    let arr = DynArray::<usize>::new();
    assert_eq!(arr.len(), 0);
    assert_eq!(arr.capacity(), 0);
    assert!(arr.is_empty());
    assert!(arr.as_slice().is_empty());
}

#[test]
fn array_const_default() {
    use const_default::ConstDefault;

    const EMPTY: DynArray<u8> = DynArray::DEFAULT;
    let mut arr = EMPTY;
    arr.push(1);
    assert_eq!(arr, [1]);
}

#[test]
fn array_with_capacity() {
    let arr = DynArray::<usize>::with_capacity(10);
    assert_eq!(arr.capacity(), 10);
    assert!(arr.is_empty());
}

#[test]
fn array_check_capacity_growth() {
    let mut res = [0usize; 10];
    let mut arr = DynArray::<usize>::new();
    for cap in res.iter_mut() {
        arr.push(1);
        *cap = arr.capacity();
    }
    assert_eq!(res, [4, 4, 4, 4, 8, 8, 8, 8, 16, 16]);
}

#[test]
fn array_check_capacity_growth_bytes() {
    let mut arr = DynArray::<u8>::new();
    arr.push(1);
    assert_eq!(arr.capacity(), 8);
}

#[test]
fn array_check_capacity_growth_exact() {
    let mut res = [0usize; 5];
    let mut arr = DynArray::<usize, GrowExact>::new();
    for cap in res.iter_mut() {
        arr.push(1);
        *cap = arr.capacity();
    }
    assert_eq!(res, [1, 2, 3, 4, 5]);
}

#[test]
fn array_walkthrough() {
    let mut arr: DynArray<i32> = DynArray::new();
    for value in [10, 20, 30, 40, 50] {
        arr.push(value);
    }
    arr.push(60);
    assert_eq!(arr.len(), 6);
    assert_eq!(arr.remove_last(), Ok(60));
    assert_eq!(arr.len(), 5);
    assert_eq!(arr, [10, 20, 30, 40, 50]);

    arr.insert_at(5, 100).unwrap();
    assert_eq!(arr, [10, 20, 30, 40, 50, 100]);
    assert_eq!(arr.len(), 6);

    assert_eq!(arr.erase_at(0), Ok(10));
    assert_eq!(arr, [20, 30, 40, 50, 100]);
    assert_eq!(arr.erase_at(2), Ok(40));
    assert_eq!(arr, [20, 30, 50, 100]);
    arr.erase_range(1..3).unwrap();
    assert_eq!(arr, [20, 100]);
    assert_eq!(arr.len(), 2);
    assert_eq!(arr.at(1), Ok(&100));
    assert!(!arr.is_empty());
}

#[test]
fn array_filled() {
    let arr = dyn_array![-1; 5];
    assert_eq!(arr.len(), 5);
    assert!(arr.iter().all(|v| *v == -1));
}

#[test]
fn array_macro_forms() {
    let empty: DynArray<u32> = dyn_array![];
    assert!(empty.is_empty());
    let listed = dyn_array![1usize, 2, 3, 4, 5,];
    assert_eq!(listed, SLICE);
    let none = dyn_array!['x'; 0];
    assert!(none.is_empty());
}

#[test]
fn array_push_pop_restores() {
    let mut arr = DynArray::<usize>::from_slice(SLICE);
    arr.push(99);
    assert_eq!(arr.pop(), Some(99));
    assert_eq!(arr, SLICE);
}

#[test]
fn array_remove_last_keeps_capacity() {
    let mut arr = DynArray::<usize>::from_slice(SLICE);
    let cap = arr.capacity();
    while arr.remove_last().is_ok() {}
    assert!(arr.is_empty());
    assert_eq!(arr.capacity(), cap);
    assert_eq!(arr.remove_last(), Err(OutOfRange::Empty));
    assert_eq!(arr.pop(), None);
}

#[rstest]
#[case::front(0)]
#[case::middle(2)]
#[case::back(4)]
#[case::end(5)]
fn array_insert_erase_inverse(#[case] position: usize) {
    let mut arr = DynArray::<usize>::from_slice(SLICE);
    arr.insert_at(position, 100).unwrap();
    assert_eq!(arr.len(), SLICE.len() + 1);
    assert_eq!(arr[position], 100);
    assert_eq!(arr.erase_at(position), Ok(100));
    assert_eq!(arr, SLICE);
}

#[test]
fn array_insert_into_empty() {
    let mut arr = DynArray::<usize>::new();
    arr.insert_at(0, 7).unwrap();
    assert_eq!(arr, [7]);
}

#[test]
fn array_insert_out_of_range() {
    let mut arr = DynArray::<usize>::from_slice(SLICE);
    assert_eq!(
        arr.insert_at(6, 0),
        Err(OutOfRange::Position {
            position: 6,
            length: 5
        })
    );
    assert_eq!(arr, SLICE);
}

#[test]
fn array_erase_out_of_range() {
    let mut arr = DynArray::<usize>::from_slice(SLICE);
    assert_eq!(
        arr.erase_at(5),
        Err(OutOfRange::Index {
            index: 5,
            length: 5
        })
    );
    let mut empty = DynArray::<usize>::new();
    assert_eq!(
        empty.erase_at(0),
        Err(OutOfRange::Index {
            index: 0,
            length: 0
        })
    );
}

#[rstest]
#[case::head(0, 2, &[3, 4, 5])]
#[case::middle(1, 4, &[1, 5])]
#[case::tail(3, 5, &[1, 2, 3])]
#[case::all(0, 5, &[])]
#[case::empty_range(2, 2, &[1, 2, 3, 4, 5])]
fn array_erase_range(#[case] start: usize, #[case] end: usize, #[case] expect: &[usize]) {
    let mut arr = DynArray::<usize>::from_slice(SLICE);
    arr.erase_range(start..end).unwrap();
    assert_eq!(arr.len(), SLICE.len() - (end - start));
    assert_eq!(arr, expect);
}

#[test]
fn array_erase_range_bounds() {
    let mut arr = DynArray::<usize>::from_slice(SLICE);
    arr.erase_range(..=1).unwrap();
    assert_eq!(arr, [3, 4, 5]);
    arr.erase_range(1..).unwrap();
    assert_eq!(arr, [3]);
    arr.erase_range(..).unwrap();
    assert!(arr.is_empty());
}

#[rstest]
#[case::past_end(2, 6)]
#[case::reversed(3, 1)]
#[case::start_past_end(6, 6)]
fn array_erase_range_out_of_range(#[case] start: usize, #[case] end: usize) {
    let mut arr = DynArray::<usize>::from_slice(SLICE);
    assert_eq!(
        arr.erase_range(start..end),
        Err(OutOfRange::Range {
            start,
            end,
            length: 5
        })
    );
    assert_eq!(arr, SLICE);
}

#[test]
fn array_erase_range_bound_overflow() {
    use core::ops::Bound;

    let mut arr = DynArray::<usize>::from_slice(SLICE);
    assert_eq!(
        arr.erase_range(2..=usize::MAX),
        Err(OutOfRange::RangeOverflow { length: 5 })
    );
    assert_eq!(
        arr.erase_range((Bound::Excluded(usize::MAX), Bound::Unbounded)),
        Err(OutOfRange::RangeOverflow { length: 5 })
    );
    assert_eq!(
        arr.erase_range(2..usize::MAX),
        Err(OutOfRange::Range {
            start: 2,
            end: usize::MAX,
            length: 5
        })
    );
    assert_eq!(arr, SLICE);
}

#[test]
fn array_send_sync_follow_element() {
    fn require_send<T: Send>() {}
    fn require_sync<T: Sync>() {}

    require_send::<DynArray<u32>>();
    require_sync::<DynArray<u32>>();
    require_send::<DynArray<Box<u32>, GrowExact>>();
    require_send::<dyn_array::IntoIter<u32>>();
    require_sync::<dyn_array::IntoIter<u32>>();
}

#[test]
fn array_at_matches_unchecked() {
    let arr = DynArray::<usize>::from_slice(SLICE);
    for i in 0..arr.len() {
        let checked = arr.at(i).unwrap();
        // SAFETY: i is below the length
        let unchecked = unsafe { arr.get_unchecked(i) };
        assert_eq!(checked, unchecked);
        assert_eq!(checked, &arr[i]);
    }
    assert_eq!(
        arr.at(5),
        Err(OutOfRange::Index {
            index: 5,
            length: 5
        })
    );
}

#[test]
fn array_at_mut() {
    let mut arr = DynArray::<usize>::from_slice(SLICE);
    *arr.at_mut(0).unwrap() = 10;
    // SAFETY: the array holds five elements
    *unsafe { arr.get_unchecked_mut(4) } = 50;
    arr[2] = 30;
    assert_eq!(arr, [10, 2, 30, 4, 50]);
    assert!(arr.at_mut(5).is_err());
}

#[test]
#[should_panic(expected = "Index out of range")]
fn array_remove_panics() {
    let mut arr = DynArray::<usize>::from_slice(SLICE);
    arr.remove(5);
}

#[test]
#[should_panic(expected = "Insertion position out of range")]
fn array_insert_panics() {
    let mut arr = DynArray::<usize>::new();
    arr.insert(1, 0);
}

#[test]
#[should_panic]
fn array_index_panics() {
    let arr = DynArray::<usize>::from_slice(SLICE);
    let _value = arr[5];
}

#[test]
fn array_iterate_restartable() {
    let arr = DynArray::<usize>::from_slice(SLICE);
    let first: Vec<usize> = arr.iter().copied().collect();
    let second: Vec<usize> = (&arr).into_iter().copied().collect();
    assert_eq!(first, SLICE);
    assert_eq!(first, second);
}

#[test]
fn array_iter_mut() {
    let mut arr = DynArray::<usize>::from_slice(SLICE);
    for value in &mut arr {
        *value *= 10;
    }
    assert_eq!(arr, [10, 20, 30, 40, 50]);
}

#[test]
fn array_into_iter() {
    let arr = DynArray::<u32>::from_iter(0..3);
    let mut iter = arr.into_iter();
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next(), Some(0));
    assert_eq!(iter.as_slice(), &[1, 2]);
    assert_eq!(iter.next_back(), Some(2));
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next(), None);
    assert!(iter.is_empty());
}

#[test]
fn array_extend() {
    let mut arr = DynArray::<usize>::new();
    arr.extend(SLICE.iter().cloned());
    assert!(arr.capacity() >= SLICE.len());
    assert_eq!(arr, SLICE);
    arr.extend(SLICE);
    assert_eq!(arr.len(), SLICE.len() * 2);
    arr.extend_from_slice(&[6]);
    assert_eq!(arr.last(), Some(&6));
}

#[test]
fn array_extend_grow() {
    let mut arr = DynArray::<usize>::with_capacity(1);
    arr.extend_from_slice(SLICE);
    assert!(arr.capacity() >= SLICE.len());
    assert_eq!(arr, SLICE);
}

#[test]
fn array_large() {
    let count = 100_000u32;
    let arr: DynArray<u32> = (0..count).collect();
    assert_eq!(arr.len(), count as usize);
    assert!(arr.capacity() >= arr.len());
    for i in 0..count {
        assert_eq!(arr[i as usize], i);
    }
}

#[test]
fn array_conversions() {
    let from_arr = DynArray::<usize>::from([1, 2, 3, 4, 5]);
    let from_slice = DynArray::<usize>::from(SLICE);
    let from_vec = DynArray::<usize>::from(SLICE.to_vec());
    assert_eq!(from_arr, from_slice);
    assert_eq!(from_slice, from_vec);
    assert_eq!(SLICE.to_vec(), from_vec);
    assert_eq!(from_vec, SLICE.to_vec());
}

#[test]
fn array_clone() {
    let arr = DynArray::<usize>::from_slice(SLICE);
    let mut copy = arr.clone();
    assert_eq!(arr, copy);
    copy.push(6);
    copy.clone_from(&arr);
    assert_eq!(arr, copy);
}

#[test]
fn array_debug() {
    let arr = dyn_array![1, 2, 3];
    assert_eq!(format!("{arr:?}"), "[1, 2, 3]");
    assert_eq!(format!("{:?}", arr.into_iter()), "IntoIter([1, 2, 3])");
}

#[test]
fn array_clear_keeps_capacity() {
    let mut arr = DynArray::<usize>::from_slice(SLICE);
    let cap = arr.capacity();
    arr.clear();
    assert!(arr.is_empty());
    assert_eq!(arr.capacity(), cap);
}

#[test]
fn array_reserve_and_shrink() {
    let mut arr = DynArray::<usize>::from_slice(SLICE);
    arr.reserve_exact(10);
    assert_eq!(arr.capacity(), 15);
    arr.reserve(1);
    assert_eq!(arr.capacity(), 15);
    arr.shrink_to_fit();
    assert_eq!(arr.capacity(), 5);
    assert_eq!(arr, SLICE);
    assert_eq!(arr.spare_capacity_mut().len(), 0);
}

#[test]
fn array_reserve_errors() {
    let mut arr = DynArray::<u64>::from_slice(&[1]);
    assert_eq!(
        arr.try_reserve(usize::MAX),
        Err(StorageError::CapacityLimit)
    );
    assert!(matches!(
        arr.try_reserve_exact(usize::MAX / 2),
        Err(StorageError::LayoutError(_))
    ));
    assert_eq!(arr, [1]);
}

#[test]
fn array_try_push() {
    let mut arr = DynArray::<u32>::new();
    assert!(arr.try_push(1).is_ok());
    assert_eq!(arr, [1]);
}

#[test]
fn array_zst() {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    struct Zst;

    let mut arr = DynArray::<Zst>::new();
    assert_eq!(arr.capacity(), usize::MAX);
    arr.push(Zst);
    arr.insert_at(0, Zst).unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0], Zst);
    assert_eq!(arr.erase_at(1), Ok(Zst));
    assert_eq!(arr.pop(), Some(Zst));
    assert_eq!(arr.pop(), None);

    arr.extend([Zst, Zst, Zst]);
    arr.erase_range(0..2).unwrap();
    assert_eq!(arr.len(), 1);

    let mut full = DynArray::<Zst>::new();
    full.extend(core::iter::repeat(Zst).take(3));
    let mut iter = full.into_iter();
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next_back(), Some(Zst));
    assert_eq!(iter.count(), 2);
}

#[test]
fn array_zst_capacity_limit() {
    #[derive(Debug)]
    struct Zst;

    let mut arr = DynArray::<Zst>::new();
    arr.extend(core::iter::repeat_with(|| Zst).take(2));
    assert_eq!(
        arr.try_reserve(usize::MAX),
        Err(StorageError::CapacityLimit)
    );
    assert_eq!(arr.len(), 2);
}

#[test]
fn array_drops_each_element_once() {
    let drops = Cell::new(0);
    let mut arr = tracked(10, &drops);

    drop(arr.erase_at(0).unwrap());
    assert_eq!(drops.get(), 1);

    arr.erase_range(2..5).unwrap();
    assert_eq!(drops.get(), 4);
    assert_eq!(values(&arr), [1, 2, 6, 7, 8, 9]);

    arr.truncate(4);
    assert_eq!(drops.get(), 6);

    drop(arr.remove_last().unwrap());
    assert_eq!(drops.get(), 7);

    drop(arr);
    assert_eq!(drops.get(), 10);
}

#[test]
fn array_into_iter_drops_remainder() {
    let drops = Cell::new(0);
    let arr = tracked(5, &drops);
    let mut iter = arr.into_iter();
    let first = iter.next().unwrap();
    assert_eq!(first.value, 0);
    drop(iter);
    assert_eq!(drops.get(), 4);
    drop(first);
    assert_eq!(drops.get(), 5);
}
