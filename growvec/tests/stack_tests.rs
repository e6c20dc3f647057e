use growvec::{GrowVecError, SlotStack};

#[test]
fn test_stack_initialization() {
    let stack = SlotStack::<u32>::new();
    assert!(stack.is_empty());
    assert_eq!(stack.len(), 0);
    assert_eq!(stack.limit(), None);
    assert_eq!(stack.top(), None);
}

#[test]
fn test_push_pop_lifo() {
    let mut stack = SlotStack::new();
    stack.push(1u32).unwrap();
    stack.push(2).unwrap();
    stack.push(3).unwrap();

    assert_eq!(stack.top(), Some(&3));
    assert_eq!(stack.len(), 3);
    assert_eq!(stack.pop(), Some(3));
    assert_eq!(stack.pop(), Some(2));
    assert_eq!(stack.pop(), Some(1));
    assert_eq!(stack.pop(), None);
}

#[test]
fn test_try_variants_on_empty() {
    let mut stack = SlotStack::<u8>::new();
    assert_eq!(stack.try_pop(), Err(GrowVecError::EmptyContainer));
    assert_eq!(stack.try_top(), Err(GrowVecError::EmptyContainer));

    stack.push(7).unwrap();
    assert_eq!(stack.try_top(), Ok(&7));
    assert_eq!(stack.try_pop(), Ok(7));
}

#[test]
fn test_bounded_stack() {
    let mut stack = SlotStack::bounded(3).unwrap();
    for value in 0..3u32 {
        stack.push(value).unwrap();
    }
    assert_eq!(stack.push(3), Err(GrowVecError::StackFull { limit: 3 }));
    assert_eq!(stack.capacity(), 3);
    assert_eq!(stack.len(), 3);

    stack.pop();
    stack.push(9).unwrap();
    assert_eq!(stack.top(), Some(&9));
}

#[test]
fn test_bounded_zero_limit() {
    assert!(SlotStack::<u32>::bounded(0).is_err());
}

#[test]
fn test_peek_at_depth() {
    let mut stack = SlotStack::new();
    for value in [10u32, 20, 30] {
        stack.push(value).unwrap();
    }
    assert_eq!(stack.peek_at(0), Some(&30));
    assert_eq!(stack.peek_at(2), Some(&10));
    assert_eq!(stack.peek_at(3), None);
    assert_eq!(stack.peek_at(usize::MAX), None);
}

#[test]
fn test_iteration_order() {
    let mut stack = SlotStack::new();
    for value in [1u32, 2, 3] {
        stack.push(value).unwrap();
    }
    assert_eq!(stack.as_slice(), &[1, 2, 3]);
    let top_down: Vec<u32> = stack.iter().copied().collect();
    assert_eq!(top_down, vec![3, 2, 1]);
}

#[test]
fn test_clear_and_shrink() {
    let mut stack = SlotStack::new();
    for value in 0..20u64 {
        stack.push(value).unwrap();
    }
    assert_eq!(stack.capacity(), 32);
    stack.clear();
    assert!(stack.is_empty());
    stack.shrink_to_fit().unwrap();
    assert_eq!(stack.capacity(), 0);
}
