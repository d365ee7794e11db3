//! Passenger travel segments.

use super::{Direction, StationId};

/// Error returned for a segment that cannot be travelled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSegment {
    /// Boarding and alighting at the same station.
    #[error("boarding and alighting station are the same ({0})")]
    ZeroLength(StationId),

    /// The segment runs against the train's direction.
    #[error("segment {from} -> {to} runs against the {direction:?} direction")]
    Inverted {
        from: StationId,
        to: StationId,
        direction: Direction,
    },
}

/// A validated (boarding, alighting) pair on a run in a given direction.
///
/// # Invariants
///
/// - `from != to`
/// - `from` precedes `to` in the direction of travel
///
/// # Examples
///
/// ```
/// use reservation_server::domain::{Direction, Segment, StationId};
///
/// let seg = Segment::new(StationId(5), StationId(2), Direction::Inbound).unwrap();
/// assert_eq!(seg.span(), (StationId(2), StationId(5)));
///
/// assert!(Segment::new(StationId(5), StationId(2), Direction::Outbound).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    from: StationId,
    to: StationId,
    direction: Direction,
}

impl Segment {
    pub fn new(from: StationId, to: StationId, direction: Direction) -> Result<Self, InvalidSegment> {
        match Direction::between(from, to) {
            None => Err(InvalidSegment::ZeroLength(from)),
            Some(d) if d != direction => Err(InvalidSegment::Inverted {
                from,
                to,
                direction,
            }),
            Some(_) => Ok(Self {
                from,
                to,
                direction,
            }),
        }
    }

    pub fn from(&self) -> StationId {
        self.from
    }

    pub fn to(&self) -> StationId {
        self.to
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The segment as a half-open span `[lo, hi)` on the canonical axis.
    pub fn span(&self) -> (StationId, StationId) {
        canonical_span(self.from, self.to, self.direction)
    }
}

/// Map a boarding/alighting pair onto the canonical (ascending id) axis.
///
/// An inverted pair yields an empty span (`lo >= hi`).
pub(crate) fn canonical_span(
    from: StationId,
    to: StationId,
    direction: Direction,
) -> (StationId, StationId) {
    match direction {
        Direction::Outbound => (from, to),
        Direction::Inbound => (to, from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_rejected() {
        let err = Segment::new(StationId(3), StationId(3), Direction::Outbound).unwrap_err();
        assert_eq!(err, InvalidSegment::ZeroLength(StationId(3)));
        assert_eq!(
            err.to_string(),
            "boarding and alighting station are the same (3)"
        );
    }

    #[test]
    fn inverted_rejected() {
        assert!(matches!(
            Segment::new(StationId(1), StationId(3), Direction::Inbound),
            Err(InvalidSegment::Inverted { .. })
        ));
        assert!(matches!(
            Segment::new(StationId(3), StationId(1), Direction::Outbound),
            Err(InvalidSegment::Inverted { .. })
        ));
    }

    #[test]
    fn span_is_canonical() {
        let out = Segment::new(StationId(1), StationId(3), Direction::Outbound).unwrap();
        let inb = Segment::new(StationId(3), StationId(1), Direction::Inbound).unwrap();
        assert_eq!(out.span(), inb.span());
        assert_eq!(inb.from(), StationId(3));
        assert_eq!(inb.to(), StationId(1));
    }
}
