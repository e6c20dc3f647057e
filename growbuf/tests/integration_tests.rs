use growbuf::{GrowthPolicy, RawBuffer, DEFAULT_CAPACITY};

fn filled(values: &[u32]) -> RawBuffer<u32> {
    RawBuffer::from_slice(values, 0).unwrap()
}

#[test]
fn test_buffer_initialization() {
    let buffer = RawBuffer::<u32>::new();

    assert_eq!(buffer.len(), 0);
    assert!(buffer.is_empty());
    assert_eq!(buffer.capacity(), 0);
    assert_eq!(buffer.available(), 0);
    assert_eq!(buffer.element_size(), 4);
}

#[test]
fn test_with_capacity() {
    let buffer = RawBuffer::<u64>::with_capacity(10).unwrap();
    assert_eq!(buffer.capacity(), 10);
    assert_eq!(buffer.available(), 10);
    assert!(buffer.is_empty());

    let empty = RawBuffer::<u64>::with_capacity(0).unwrap();
    assert_eq!(empty.capacity(), 0);
}

#[test]
fn test_zeroed() {
    let buffer = RawBuffer::<u16>::zeroed(5).unwrap();
    assert_eq!(buffer.len(), 5);
    assert_eq!(buffer.as_slice(), &[0; 5]);
}

#[test]
fn test_from_slice_with_extra_capacity() {
    let buffer = RawBuffer::from_slice(&[1u8, 2, 3], 4).unwrap();
    assert_eq!(buffer.as_slice(), &[1, 2, 3]);
    assert_eq!(buffer.capacity(), 7);
    assert_eq!(buffer.available(), 4);
}

#[test]
fn test_documented_scenario() {
    let policy = GrowthPolicy::default();
    let mut buffer = RawBuffer::<u32>::new();

    buffer.ensure_additional(&policy, 3).unwrap();
    buffer.append_data(&[10, 20, 30]).unwrap();
    assert_eq!(buffer.len(), 3);
    assert!(buffer.capacity() >= 3);

    buffer.insert_element(1, 99).unwrap();
    assert_eq!(buffer.as_slice(), &[10, 99, 20, 30]);
    assert_eq!(buffer.len(), 4);

    assert_eq!(buffer.remove(0).unwrap(), 10);
    assert_eq!(buffer.as_slice(), &[99, 20, 30]);
    assert_eq!(buffer.len(), 3);

    buffer.shrink_to_fit().unwrap();
    assert_eq!(buffer.capacity(), 3);
    assert_eq!(buffer.as_slice(), &[99, 20, 30]);
}

#[test]
fn test_append_does_not_grow() {
    let mut buffer = RawBuffer::<u32>::with_capacity(2).unwrap();
    buffer.append_element(1).unwrap();
    buffer.append_element(2).unwrap();

    assert!(buffer.append_element(3).is_err());
    assert_eq!(buffer.capacity(), 2);
    assert_eq!(buffer.as_slice(), &[1, 2]);
}

#[test]
fn test_prepend() {
    let mut buffer = RawBuffer::<u32>::with_capacity(8).unwrap();
    buffer.append_data(&[3, 4]).unwrap();
    buffer.prepend_element(2).unwrap();
    buffer.prepend_data(&[0, 1]).unwrap();

    assert_eq!(buffer.as_slice(), &[0, 1, 2, 3, 4]);
}

#[test]
fn test_insert_positions() {
    let mut buffer = RawBuffer::<u32>::with_capacity(10).unwrap();
    buffer.append_data(&[1, 2, 3]).unwrap();

    // insertion at len behaves like append
    buffer.insert_element(3, 4).unwrap();
    assert_eq!(buffer.as_slice(), &[1, 2, 3, 4]);

    // -1 inserts before the last slot
    buffer.insert_element(-1, 9).unwrap();
    assert_eq!(buffer.as_slice(), &[1, 2, 3, 9, 4]);

    buffer.insert_data(0, &[7, 8]).unwrap();
    assert_eq!(buffer.as_slice(), &[7, 8, 1, 2, 3, 9, 4]);
}

#[test]
fn test_zero_length_insert_is_noop() {
    let mut buffer = RawBuffer::<u32>::new();
    assert!(buffer.append_data(&[]).is_ok());
    assert!(buffer.insert_data(5, &[]).is_ok());
    assert!(buffer.prepend_data(&[]).is_ok());
    assert_eq!(buffer.len(), 0);
    assert_eq!(buffer.capacity(), 0);
}

#[test]
fn test_remove_negative_index() {
    let mut buffer = filled(&[1, 2, 3, 4]);
    assert_eq!(buffer.remove(-1).unwrap(), 4);
    assert_eq!(buffer.remove(-3).unwrap(), 1);
    assert_eq!(buffer.as_slice(), &[2, 3]);
}

#[test]
fn test_remove_range() {
    let mut buffer = filled(&[0, 1, 2, 3, 4, 5]);
    assert_eq!(buffer.remove_range(1, 3).unwrap(), 3);
    assert_eq!(buffer.as_slice(), &[0, 4, 5]);

    assert_eq!(buffer.remove_range(-2, -1).unwrap(), 2);
    assert_eq!(buffer.as_slice(), &[0]);
    // capacity is untouched by removal
    assert_eq!(buffer.capacity(), 6);
}

#[test]
fn test_remove_range_on_empty_buffer() {
    let mut buffer = RawBuffer::<u32>::new();
    assert_eq!(buffer.remove_range(0, -1).unwrap(), 0);
}

#[test]
fn test_erase_absolute_range() {
    let mut buffer = filled(&[0, 1, 2, 3]);
    assert_eq!(buffer.erase(1..3).unwrap(), 2);
    assert_eq!(buffer.as_slice(), &[0, 3]);
    assert_eq!(buffer.erase(1..1).unwrap(), 0);
    assert!(buffer.erase(0..5).is_err());
}

#[test]
fn test_get_set() {
    let mut buffer = filled(&[5, 6, 7]);
    assert_eq!(buffer.get(0), Some(&5));
    assert_eq!(buffer.get(-1), Some(&7));
    assert_eq!(buffer.get(3), None);
    assert_eq!(buffer.get(-4), None);

    assert_eq!(buffer.set(-2, 60).unwrap(), 6);
    *buffer.get_mut(0).unwrap() = 50;
    assert_eq!(buffer.as_slice(), &[50, 60, 7]);
}

#[test]
fn test_pop_truncate_clear() {
    let mut buffer = filled(&[1, 2, 3, 4]);
    assert_eq!(buffer.pop(), Some(4));
    buffer.truncate(10);
    assert_eq!(buffer.len(), 3);
    buffer.truncate(1);
    assert_eq!(buffer.as_slice(), &[1]);
    buffer.clear();
    assert!(buffer.is_empty());
    assert_eq!(buffer.pop(), None);
    assert_eq!(buffer.capacity(), 4);
}

#[test]
fn test_grow_steps() {
    let policy = GrowthPolicy::default();
    let mut buffer = RawBuffer::<u32>::new();

    assert_eq!(buffer.grow(&policy, None).unwrap(), DEFAULT_CAPACITY);
    buffer.append_data(&[1, 2, 3]).unwrap();
    assert_eq!(buffer.grow(&policy, None).unwrap(), DEFAULT_CAPACITY * 2);
    assert_eq!(buffer.as_slice(), &[1, 2, 3]);
}

#[test]
fn test_ensure_capacity_keeps_contents() {
    let policy = GrowthPolicy::default();
    let mut buffer = RawBuffer::<u32>::with_capacity(8).unwrap();
    buffer.append_data(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();

    buffer.ensure_capacity(&policy, 20).unwrap();
    assert_eq!(buffer.capacity(), 32);
    assert_eq!(buffer.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8]);

    buffer.ensure_capacity(&policy, 4).unwrap();
    assert_eq!(buffer.capacity(), 32);
}

#[test]
fn test_reserve_is_exact() {
    let mut buffer = RawBuffer::<u32>::with_capacity(4).unwrap();
    buffer.reserve(13).unwrap();
    assert_eq!(buffer.capacity(), 13);
    buffer.reserve(5).unwrap();
    assert_eq!(buffer.capacity(), 13);
}

#[test]
fn test_maybe_shrink() {
    let policy = GrowthPolicy::default();
    let mut buffer = RawBuffer::<u32>::with_capacity(64).unwrap();
    buffer.append_data(&[1, 2, 3]).unwrap();

    assert!(buffer.maybe_shrink(&policy).unwrap());
    assert_eq!(buffer.capacity(), 6);
    assert_eq!(buffer.as_slice(), &[1, 2, 3]);

    // 3 of 6 is above the threshold
    assert!(!buffer.maybe_shrink(&policy).unwrap());
    assert_eq!(buffer.capacity(), 6);
}

#[test]
fn test_maybe_shrink_respects_floor() {
    let policy = GrowthPolicy::default();
    let mut buffer = RawBuffer::<u32>::with_capacity(4).unwrap();
    assert!(!buffer.maybe_shrink(&policy).unwrap());
    assert_eq!(buffer.capacity(), 4);

    let mut buffer = RawBuffer::<u32>::with_capacity(100).unwrap();
    assert!(buffer.maybe_shrink(&policy).unwrap());
    assert_eq!(buffer.capacity(), policy.min_capacity());
}

#[test]
fn test_shrink_to_fit_empty_frees() {
    let mut buffer = RawBuffer::<u32>::with_capacity(16).unwrap();
    buffer.shrink_to_fit().unwrap();
    assert_eq!(buffer.capacity(), 0);
}

#[test]
fn test_copy_to() {
    let buffer = filled(&[1, 2, 3]);
    let mut destination = [0u32; 5];
    assert_eq!(buffer.copy_to(&mut destination).unwrap(), 3);
    assert_eq!(destination, [1, 2, 3, 0, 0]);

    let mut small = [0u32; 2];
    assert!(buffer.copy_to(&mut small).is_err());
    assert_eq!(small, [0, 0]);
}

#[test]
fn test_release() {
    let mut buffer = filled(&[1, 2]);
    buffer.release();
    assert_eq!(buffer.len(), 0);
    assert_eq!(buffer.capacity(), 0);
}

#[test]
fn test_struct_slots() {
    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    let mut buffer = RawBuffer::<Point>::with_capacity(2).unwrap();
    buffer.append_element(Point { x: 1, y: 2 }).unwrap();
    buffer.prepend_element(Point { x: 0, y: 0 }).unwrap();
    assert_eq!(buffer.get(-1), Some(&Point { x: 1, y: 2 }));
    assert_eq!(buffer.element_size(), 8);
}
