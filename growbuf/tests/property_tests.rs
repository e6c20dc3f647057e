//! Property tests for the growth policy, index normalization and the
//! primary/chunk storage model.

use growbuf::{
    consolidate, get_element_chunked, normalize_index, total_count, ChunkList, GrowthPolicy,
    RawBuffer,
};
use proptest::prelude::*;

fn arbitrary_policy() -> impl Strategy<Value = GrowthPolicy> {
    (2usize..=4, 1usize..=32, 0usize..=99).prop_flat_map(|(factor, default, threshold)| {
        (0usize..=default).prop_map(move |min| {
            GrowthPolicy::new(factor, default, min, threshold).expect("valid policy")
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// ensure_capacity never shrinks and always satisfies the requirement
    #[test]
    fn ensure_capacity_is_monotonic(
        policy in arbitrary_policy(),
        capacity in 0usize..10_000,
        extra in 1usize..10_000,
    ) {
        let required = capacity + extra;
        let next = policy.ensure_capacity(capacity, required).unwrap();
        prop_assert!(next >= required);
        prop_assert!(next >= capacity);
    }

    /// maybe_shrink never goes below the count or the floor
    #[test]
    fn shrink_target_respects_floor(
        policy in arbitrary_policy(),
        capacity in 0usize..10_000,
        count_pct in 0.0..=1.0f64,
    ) {
        let count = ((capacity as f64) * count_pct) as usize;
        if let Some(target) = policy.shrink_target(count, capacity) {
            prop_assert!(target >= count);
            prop_assert!(target >= policy.min_capacity());
            prop_assert!(target < capacity);
        }
    }

    /// A non-negative index and its negative twin address the same slot
    #[test]
    fn negative_index_round_trip(count in 1usize..1_000, offset_pct in 0.0..1.0f64) {
        let i = (((count as f64) * offset_pct) as usize).min(count - 1);
        let positive = isize::try_from(i).unwrap();
        let negative = positive - isize::try_from(count).unwrap();
        prop_assert_eq!(normalize_index(positive, count), Ok(i));
        prop_assert_eq!(normalize_index(negative, count), Ok(i));
    }

    /// Inserting then removing at the same index restores the sequence
    #[test]
    fn insert_remove_inverse(
        values in prop::collection::vec(any::<u32>(), 0..64),
        extra in any::<u32>(),
        at_pct in 0.0..=1.0f64,
    ) {
        let policy = GrowthPolicy::default();
        let mut buffer = RawBuffer::from_slice(&values, 0).unwrap();
        let at = ((values.len() as f64) * at_pct) as usize;
        let index = isize::try_from(at).unwrap();

        buffer.ensure_additional(&policy, 1).unwrap();
        buffer.insert_element(index, extra).unwrap();
        prop_assert_eq!(buffer.len(), values.len() + 1);
        prop_assert_eq!(buffer.remove(index).unwrap(), extra);
        prop_assert_eq!(buffer.as_slice(), values.as_slice());
    }

    /// One bulk append equals many single appends
    #[test]
    fn append_ordering(values in prop::collection::vec(any::<u16>(), 0..128)) {
        let policy = GrowthPolicy::default();

        let mut bulk = RawBuffer::new();
        bulk.ensure_additional(&policy, values.len()).unwrap();
        bulk.append_data(&values).unwrap();

        let mut single = RawBuffer::new();
        for value in &values {
            single.ensure_additional(&policy, 1).unwrap();
            single.append_element(*value).unwrap();
        }

        prop_assert_eq!(bulk.as_slice(), single.as_slice());
    }

    /// Lookups see the same data before and after consolidation
    #[test]
    fn consolidate_is_transparent(
        primary_values in prop::collection::vec(any::<u32>(), 0..32),
        appended in prop::collection::vec(prop::collection::vec(any::<u32>(), 0..20), 0..8),
        chunk_capacity in 1usize..9,
    ) {
        let mut primary = RawBuffer::from_slice(&primary_values, 0).unwrap();
        let mut chunks = ChunkList::new(chunk_capacity).unwrap();
        let mut expected = primary_values.clone();
        for batch in &appended {
            chunks.append_data(batch).unwrap();
            expected.extend_from_slice(batch);
        }

        let before = total_count(primary.len(), Some(&chunks));
        prop_assert_eq!(before, expected.len());
        for (k, value) in expected.iter().enumerate() {
            let index = isize::try_from(k).unwrap();
            prop_assert_eq!(get_element_chunked(primary.as_slice(), Some(&chunks), index), Some(value));
        }

        consolidate(&mut primary, &mut chunks).unwrap();

        prop_assert_eq!(primary.len(), before);
        prop_assert_eq!(chunks.chunk_count(), 0);
        prop_assert_eq!(primary.as_slice(), expected.as_slice());
    }
}
