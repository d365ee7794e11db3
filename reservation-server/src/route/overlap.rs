//! Segment overlap on a single run.
//!
//! A reservation occupies a seat on every track section between its
//! boarding and alighting stations. Two segments on the same run conflict
//! when they share at least one section; touching at a single station
//! (one alights where the other boards) is not a conflict.
//!
//! Both segments are mapped onto the canonical axis as half-open spans
//! `[lo, hi)` of station ids, after which direction no longer matters.

use crate::domain::{Direction, Segment, StationId, canonical_span};

/// Whether a requested segment and a reserved segment share any section.
///
/// Station pairs are given in travel order for `direction`. A pair that is
/// zero-length or runs against `direction` covers no sections and never
/// overlaps; such input is rejected by [`Segment::new`] before it gets here.
///
/// The overlap covers three cases: the reservation spans the requested
/// boarding point, it spans the requested alighting point, or it lies
/// entirely inside the requested segment.
pub fn segments_overlap(
    req_from: StationId,
    req_to: StationId,
    res_from: StationId,
    res_to: StationId,
    direction: Direction,
) -> bool {
    let (req_lo, req_hi) = canonical_span(req_from, req_to, direction);
    let (res_lo, res_hi) = canonical_span(res_from, res_to, direction);

    req_lo.max(res_lo) < req_hi.min(res_hi)
}

impl Segment {
    /// Whether two segments of the same run share any section.
    pub fn overlaps(&self, other: &Segment) -> bool {
        let (a_lo, a_hi) = self.span();
        let (b_lo, b_hi) = other.span();
        a_lo.max(b_lo) < a_hi.min(b_hi)
    }
}

/// Whether any of the reserved segments blocks the requested one.
pub fn is_occupied<'a>(
    requested: &Segment,
    reserved: impl IntoIterator<Item = &'a Segment>,
) -> bool {
    reserved.into_iter().any(|r| requested.overlaps(r))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> StationId {
        StationId(n)
    }

    fn out(from: u32, to: u32) -> Segment {
        Segment::new(id(from), id(to), Direction::Outbound).unwrap()
    }

    fn inb(from: u32, to: u32) -> Segment {
        Segment::new(id(from), id(to), Direction::Inbound).unwrap()
    }

    #[test]
    fn adjacent_segments_do_not_overlap() {
        assert!(!segments_overlap(id(5), id(9), id(0), id(5), Direction::Outbound));
        assert!(!segments_overlap(id(0), id(5), id(5), id(9), Direction::Outbound));
        assert!(!segments_overlap(id(9), id(5), id(5), id(0), Direction::Inbound));
    }

    #[test]
    fn identical_segments_overlap() {
        assert!(segments_overlap(id(2), id(4), id(2), id(4), Direction::Outbound));
        assert!(segments_overlap(id(4), id(2), id(4), id(2), Direction::Inbound));
    }

    #[test]
    fn reservation_spans_boarding_point() {
        // Reserved 1->4, requested 3->6
        assert!(segments_overlap(id(3), id(6), id(1), id(4), Direction::Outbound));
        assert!(segments_overlap(id(6), id(3), id(8), id(5), Direction::Inbound));
    }

    #[test]
    fn reservation_spans_alighting_point() {
        // Reserved 4->8, requested 2->5
        assert!(segments_overlap(id(2), id(5), id(4), id(8), Direction::Outbound));
        assert!(segments_overlap(id(5), id(2), id(3), id(1), Direction::Inbound));
    }

    #[test]
    fn reservation_inside_request() {
        assert!(segments_overlap(id(1), id(9), id(3), id(5), Direction::Outbound));
        assert!(segments_overlap(id(9), id(1), id(5), id(3), Direction::Inbound));
    }

    #[test]
    fn disjoint_segments_do_not_overlap() {
        assert!(!segments_overlap(id(1), id(2), id(5), id(7), Direction::Outbound));
        assert!(!segments_overlap(id(7), id(5), id(2), id(1), Direction::Inbound));
    }

    #[test]
    fn inverted_pair_never_overlaps() {
        assert!(!segments_overlap(id(5), id(1), id(1), id(5), Direction::Outbound));
    }

    #[test]
    fn segment_method_agrees_with_free_function() {
        assert!(out(1, 5).overlaps(&out(4, 6)));
        assert!(!out(1, 5).overlaps(&out(5, 6)));
        assert!(inb(6, 2).overlaps(&inb(3, 1)));
        assert!(!inb(6, 2).overlaps(&inb(2, 1)));
    }

    #[test]
    fn occupied_if_any_reservation_overlaps() {
        let reserved = [out(0, 2), out(6, 8)];
        assert!(!is_occupied(&out(2, 6), &reserved));
        assert!(is_occupied(&out(1, 3), &reserved));
        assert!(is_occupied(&out(5, 7), &reserved));
        assert!(!is_occupied(&out(2, 6), &[]));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// An ordered pair `a < b` of station ids.
    fn span() -> impl Strategy<Value = (u32, u32)> {
        (0u32..30, 1u32..30).prop_map(|(a, len)| (a, a + len))
    }

    proptest! {
        /// Overlap matches the closed-form interval test for both directions
        #[test]
        fn matches_interval_formula((a, b) in span(), (x, y) in span()) {
            let expected = a.max(x) < b.min(y);
            prop_assert_eq!(
                segments_overlap(StationId(x), StationId(y), StationId(a), StationId(b), Direction::Outbound),
                expected
            );
            prop_assert_eq!(
                segments_overlap(StationId(y), StationId(x), StationId(b), StationId(a), Direction::Inbound),
                expected
            );
        }

        /// Overlap means sharing a track section between consecutive stations
        #[test]
        fn matches_shared_sections((a, b) in span(), (x, y) in span()) {
            let shared = (a..b).any(|section| (x..y).contains(&section));
            prop_assert_eq!(
                segments_overlap(StationId(x), StationId(y), StationId(a), StationId(b), Direction::Outbound),
                shared
            );
        }

        /// Requests entirely before, after, or adjacent to a reservation are free
        #[test]
        fn outside_or_adjacent_is_free((a, b) in span(), len in 1u32..10) {
            if a >= len {
                // [a - len, a) ends where the reservation starts
                prop_assert!(!segments_overlap(StationId(a - len), StationId(a), StationId(a), StationId(b), Direction::Outbound));
            }
            prop_assert!(!segments_overlap(StationId(b), StationId(b + len), StationId(a), StationId(b), Direction::Outbound));
        }

        /// Overlap is symmetric in request and reservation
        #[test]
        fn symmetric((a, b) in span(), (x, y) in span()) {
            prop_assert_eq!(
                segments_overlap(StationId(x), StationId(y), StationId(a), StationId(b), Direction::Outbound),
                segments_overlap(StationId(a), StationId(b), StationId(x), StationId(y), Direction::Outbound)
            );
        }
    }
}
