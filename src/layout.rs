//! Offset arithmetic for the rendered sequence.
//!
//! Elements are kept in visual order: index 0 is nearest the top of the
//! surface. With a top anchor offsets grow with the index, with a bottom
//! anchor they grow towards index 0. Each element's offset is the sum of the
//! footprints between it and the anchor.

use crate::state::Rendered;
use popstack_config::{Edge, Insert};
use popstack_util::ElementId;

/// Space one element takes in the sequence.
pub fn footprint(extent: f32, gap: f32) -> f32 {
    extent + gap
}

/// Height the rendered sequence needs.
pub fn aggregate_extent(elements: &[Rendered], gap: f32) -> f32 {
    elements.iter().map(|e| footprint(e.extent, gap)).sum()
}

/// Position the element just inserted at `index` and shift the ones beyond it.
///
/// Walks outward from the inserted element once. Elements between it and the
/// anchor keep their offsets. Returns the ids whose offset changed, the new
/// element first.
pub fn place_inserted(elements: &mut [Rendered], index: usize, edge: Edge, gap: f32) -> Vec<ElementId> {
    let mut changed = Vec::new();
    if index >= elements.len() {
        return changed;
    }

    match edge {
        Edge::Top => {
            for i in index..elements.len() {
                let offset = match i.checked_sub(1) {
                    Some(prev) => elements[prev].offset + footprint(elements[prev].extent, gap),
                    None => 0.0,
                };
                if i == index || elements[i].offset != offset {
                    elements[i].offset = offset;
                    changed.push(elements[i].id);
                }
            }
        }
        Edge::Bottom => {
            let last = elements.len() - 1;
            for i in (0..=index).rev() {
                let offset = if i == last {
                    0.0
                } else {
                    elements[i + 1].offset + footprint(elements[i + 1].extent, gap)
                };
                if i == index || elements[i].offset != offset {
                    elements[i].offset = offset;
                    changed.push(elements[i].id);
                }
            }
        }
    }

    changed
}

/// Close the gap left by an element removed from `index`.
///
/// `elements` no longer contains the removed element. Elements on its far
/// side move towards the anchor by `removed`; the rest stay put.
pub fn close_gap(elements: &mut [Rendered], index: usize, removed: f32, edge: Edge) -> Vec<ElementId> {
    let range = match edge {
        Edge::Top => index.min(elements.len())..elements.len(),
        Edge::Bottom => 0..index.min(elements.len()),
    };

    elements[range]
        .iter_mut()
        .map(|element| {
            element.offset = (element.offset - removed).max(0.0);
            element.id
        })
        .collect()
}

/// Whether a newly inserted element made the surface too tall.
pub fn overflows(surface_height: f32, distance: f32, viewport: f32) -> bool {
    surface_height + distance > viewport
}

/// Whether settled content reaches the viewport edge and the oldest must go.
pub fn must_evict(surface_height: f32, distance: f32, viewport: f32) -> bool {
    surface_height + distance >= viewport
}

/// Index of the oldest element given which end new elements join.
pub fn eviction_index(len: usize, insert: Insert) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match insert {
        Insert::Tail => Some(0),
        Insert::Head => Some(len - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use popstack_util::Notification;

    fn element(id: u64, extent: f32) -> Rendered {
        Rendered::new(ElementId(id), Notification::default(), extent, false)
    }

    fn offsets(elements: &[Rendered]) -> Vec<f32> {
        elements.iter().map(|e| e.offset).collect()
    }

    #[test]
    fn test_tail_insert_top_anchor() {
        let mut elements = vec![element(1, 50.0)];
        place_inserted(&mut elements, 0, Edge::Top, 10.0);
        elements.push(element(2, 30.0));

        let changed = place_inserted(&mut elements, 1, Edge::Top, 10.0);
        assert_eq!(changed, vec![ElementId(2)]);
        assert_eq!(offsets(&elements), [0.0, 60.0]);
    }

    #[test]
    fn test_head_insert_top_anchor_shifts_all() {
        let mut elements = vec![element(1, 50.0), element(2, 30.0)];
        place_inserted(&mut elements, 0, Edge::Top, 10.0);
        place_inserted(&mut elements, 1, Edge::Top, 10.0);

        elements.insert(0, element(3, 20.0));
        let changed = place_inserted(&mut elements, 0, Edge::Top, 10.0);

        assert_eq!(changed, vec![ElementId(3), ElementId(1), ElementId(2)]);
        assert_eq!(offsets(&elements), [0.0, 30.0, 90.0]);
    }

    #[test]
    fn test_tail_insert_bottom_anchor_shifts_all() {
        let mut elements = vec![element(1, 50.0)];
        place_inserted(&mut elements, 0, Edge::Bottom, 10.0);

        elements.push(element(2, 30.0));
        let changed = place_inserted(&mut elements, 1, Edge::Bottom, 10.0);

        assert_eq!(changed, vec![ElementId(2), ElementId(1)]);
        assert_eq!(offsets(&elements), [40.0, 0.0]);
    }

    #[test]
    fn test_head_insert_bottom_anchor() {
        let mut elements = vec![element(1, 50.0)];
        place_inserted(&mut elements, 0, Edge::Bottom, 10.0);

        elements.insert(0, element(2, 30.0));
        let changed = place_inserted(&mut elements, 0, Edge::Bottom, 10.0);

        assert_eq!(changed, vec![ElementId(2)]);
        assert_eq!(offsets(&elements), [60.0, 0.0]);
    }

    #[test]
    fn test_close_gap_top_anchor() {
        let mut elements = vec![element(1, 50.0), element(2, 30.0), element(3, 20.0)];
        for i in 0..3 {
            place_inserted(&mut elements, i, Edge::Top, 10.0);
        }
        let removed = elements.remove(1);

        let changed = close_gap(&mut elements, 1, footprint(removed.extent, 10.0), Edge::Top);
        assert_eq!(changed, vec![ElementId(3)]);
        assert_eq!(offsets(&elements), [0.0, 60.0]);
    }

    #[test]
    fn test_close_gap_bottom_anchor() {
        let mut elements = vec![element(1, 50.0), element(2, 30.0), element(3, 20.0)];
        for i in 0..3 {
            place_inserted(&mut elements, i, Edge::Bottom, 10.0);
        }
        assert_eq!(offsets(&elements), [70.0, 30.0, 0.0]);

        let removed = elements.remove(1);
        let changed = close_gap(&mut elements, 1, footprint(removed.extent, 10.0), Edge::Bottom);
        assert_eq!(changed, vec![ElementId(1)]);
        assert_eq!(offsets(&elements), [30.0, 0.0]);
    }

    #[test]
    fn test_long_sequence_single_pass() {
        let mut elements: Vec<_> = (0..10_000).map(|i| element(i, 1.0)).collect();
        let changed = place_inserted(&mut elements, 0, Edge::Top, 0.0);
        assert_eq!(changed.len(), 10_000);
        assert_eq!(elements[9_999].offset, 9_999.0);
    }

    #[test]
    fn test_aggregate_extent() {
        let elements = vec![element(1, 50.0), element(2, 30.0)];
        assert_eq!(aggregate_extent(&elements, 10.0), 100.0);
        assert_eq!(aggregate_extent(&elements, 0.0), 80.0);
    }

    #[test]
    fn test_overflow_thresholds() {
        assert!(!overflows(600.0, 20.0, 620.0));
        assert!(must_evict(600.0, 20.0, 620.0));
        assert!(overflows(601.0, 20.0, 620.0));
        assert!(!must_evict(599.0, 20.0, 620.0));
    }

    #[test]
    fn test_eviction_index_follows_insert_side() {
        assert_eq!(eviction_index(3, Insert::Tail), Some(0));
        assert_eq!(eviction_index(3, Insert::Head), Some(2));
        assert_eq!(eviction_index(0, Insert::Tail), None);
    }
}
