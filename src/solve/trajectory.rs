//! Piecewise continuous solution assembled from accepted steps.

use crate::{
    Float,
    core::state::StateVector,
    error::Error,
    solve::dense::DenseOutputSegment,
};

/// The integrated solution as an ordered, gap-free chain of
/// [`DenseOutputSegment`]s starting at the initial point.
///
/// Segments are only ever appended. Each one starts where the previous one
/// ended, and end times strictly increase.
#[derive(Debug, Clone)]
pub struct Trajectory {
    t0: Float,
    y0: StateVector,
    segments: Vec<DenseOutputSegment>,
}

impl Trajectory {
    pub(crate) fn new(t0: Float, y0: StateVector) -> Self {
        Self {
            t0,
            y0,
            segments: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, segment: DenseOutputSegment) {
        debug_assert_eq!(segment.t_start(), self.t_end(), "segments must be contiguous");
        debug_assert!(segment.t_end() > segment.t_start());
        self.segments.push(segment);
    }

    pub fn t_start(&self) -> Float {
        self.t0
    }

    /// End of the integrated range; `t0` before the first step.
    pub fn t_end(&self) -> Float {
        self.segments.last().map_or(self.t0, |s| s.t_end())
    }

    pub fn t_span(&self) -> (Float, Float) {
        (self.t_start(), self.t_end())
    }

    pub fn y0(&self) -> &StateVector {
        &self.y0
    }

    /// Number of accepted steps.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.y0.dim()
    }

    pub fn segments(&self) -> &[DenseOutputSegment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DenseOutputSegment> {
        self.segments.iter()
    }

    /// Evaluate the solution at `t`.
    ///
    /// Locates the segment by binary search over the segment start times. At a
    /// shared endpoint the later segment is used; both agree there since the
    /// later segment starts from the committed state of the earlier one.
    pub fn query(&self, t: Float) -> Result<StateVector, Error> {
        let (start, end) = self.t_span();
        if !(t >= start && t <= end) {
            return Err(Error::OutOfRange { t, start, end });
        }
        if self.segments.is_empty() {
            return Ok(self.y0.clone());
        }
        let idx = self.segments.partition_point(|s| s.t_start() <= t).max(1) - 1;
        self.segments[idx].evaluate(t)
    }

    /// Evaluate the solution at every time in `times`.
    ///
    /// Fails on the first time outside the integrated range.
    pub fn sample(&self, times: &[Float]) -> Result<Vec<(Float, StateVector)>, Error> {
        times.iter().map(|&t| Ok((t, self.query(t)?))).collect()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a DenseOutputSegment;
    type IntoIter = std::slice::Iter<'a, DenseOutputSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
