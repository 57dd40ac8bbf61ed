//! Out-of-range handling for interpolation and padding.

/// How interpolation treats sample coordinates outside the input grid.
///
/// # Examples
///
/// ```
/// use gridfield_ndimage::BoundaryMode;
///
/// // Nearest clamps onto the edge sample.
/// assert_eq!(BoundaryMode::Nearest.fold_coordinate(-2.0, 5), Some(0.0));
/// // Constant leaves the grid and yields the fill value instead.
/// assert_eq!(BoundaryMode::Constant(0.0).fold_coordinate(-2.0, 5), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryMode {
    /// Points outside the grid take the given value.
    Constant(f64),
    /// Points outside the grid take the value of the closest edge sample.
    Nearest,
    /// Half-sample symmetric extension (`d c b a | a b c d | d c b a`).
    Reflect,
    /// Whole-sample symmetric extension (`d c b | a b c d | c b a`).
    Mirror,
    /// Periodic extension (`a b c d | a b c d | a b c d`).
    Wrap,
}

impl Default for BoundaryMode {
    fn default() -> Self {
        Self::Constant(0.0)
    }
}

/// Tolerance for treating a coordinate as lying on the grid edge.
const EDGE_TOL: f64 = 1e-9;

impl BoundaryMode {
    /// Fold a coordinate into `[0, len - 1]`.
    ///
    /// Returns `None` when the coordinate leaves the grid under
    /// [`BoundaryMode::Constant`]; the caller then uses the fill value.
    pub fn fold_coordinate(self, x: f64, len: usize) -> Option<f64> {
        let last = len.saturating_sub(1) as f64;
        if len <= 1 {
            return match self {
                Self::Constant(_) if x.abs() > EDGE_TOL => None,
                _ => Some(0.0),
            };
        }
        let n = len as f64;
        let folded = match self {
            Self::Constant(_) => {
                if x < -EDGE_TOL || x > last + EDGE_TOL {
                    return None;
                }
                x
            }
            Self::Nearest => x,
            Self::Wrap => x.rem_euclid(n),
            Self::Reflect => {
                let period = 2.0 * n;
                let y = (x + 0.5).rem_euclid(period) - 0.5;
                if y > n - 0.5 {
                    period - 1.0 - y
                } else {
                    y
                }
            }
            Self::Mirror => {
                let period = 2.0 * last;
                let y = x.rem_euclid(period);
                if y > last {
                    period - y
                } else {
                    y
                }
            }
        };
        Some(folded.clamp(0.0, last))
    }

    /// The fill value for [`BoundaryMode::Constant`], `0.0` otherwise.
    pub fn cval(self) -> f64 {
        match self {
            Self::Constant(v) => v,
            _ => 0.0,
        }
    }
}

/// How padding fills the new border samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PadMode {
    /// Fill with a constant.
    Constant(f64),
    /// Repeat the edge sample.
    Edge,
    /// Mirror without repeating the edge sample (`c b | a b c | b a`).
    Reflect,
    /// Mirror including the edge sample (`b a | a b c | c b`).
    Symmetric,
    /// Periodic continuation.
    Wrap,
}

impl Default for PadMode {
    fn default() -> Self {
        Self::Constant(0.0)
    }
}

impl PadMode {
    /// Resolve a possibly out-of-range index on an axis of length `len`.
    ///
    /// Returns `None` when the sample comes from the constant fill (or the
    /// axis is empty).
    pub fn resolve_index(self, i: isize, len: usize) -> Option<usize> {
        let n = len as isize;
        if n == 0 {
            return None;
        }
        if i >= 0 && i < n {
            return Some(i as usize);
        }
        let resolved = match self {
            Self::Constant(_) => return None,
            Self::Edge => i.clamp(0, n - 1),
            Self::Wrap => i.rem_euclid(n),
            Self::Symmetric => {
                let period = 2 * n;
                let j = i.rem_euclid(period);
                if j >= n {
                    period - 1 - j
                } else {
                    j
                }
            }
            Self::Reflect => {
                if n == 1 {
                    0
                } else {
                    let period = 2 * (n - 1);
                    let j = i.rem_euclid(period);
                    if j >= n {
                        period - j
                    } else {
                        j
                    }
                }
            }
        };
        Some(resolved as usize)
    }
}
