use core::fmt;

/// The balance factor of a BB[α] tree.
///
/// Every interior node keeps at least `α` of its leaves in each subtree. A
/// smaller `α` tolerates more skew and rotates less often; a larger `α` keeps
/// the tree closer to perfectly balanced.
///
/// Single and double rotations are only guaranteed to restore balance for
/// `2/11 < α ≤ 1 - 1/√2`, so [`Alpha::new`] rejects anything outside that
/// range.
///
/// # Examples
///
/// ```
/// use bb_leaf_tree::{Alpha, AlphaError, LeafTree};
///
/// let alpha = Alpha::new(0.25).unwrap();
/// let tree: LeafTree<u32, &str> = LeafTree::with_alpha(alpha);
/// assert_eq!(tree.alpha(), alpha);
///
/// assert_eq!(Alpha::new(0.5), Err(AlphaError::OutOfRange(0.5)));
/// ```
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Alpha(f64);

/// Why a balance factor was rejected by [`Alpha::new`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum AlphaError {
    /// The value was NaN or infinite.
    #[error("balance factor must be a finite number")]
    NotFinite,
    /// The value lies outside `(Alpha::MIN, Alpha::MAX]`.
    #[error("balance factor {0} is outside (2/11, 1 - 1/sqrt(2)]")]
    OutOfRange(f64),
}

impl Alpha {
    /// Exclusive lower bound.
    pub const MIN: f64 = 2.0 / 11.0;
    /// Inclusive upper bound, `1 - 1/√2`.
    pub const MAX: f64 = 1.0 - core::f64::consts::FRAC_1_SQRT_2;
    /// The balance factor used by [`Alpha::default`].
    pub const DEFAULT: Alpha = Alpha(0.29);

    /// Validates `alpha`.
    ///
    /// # Errors
    ///
    /// Returns [`AlphaError::NotFinite`] for NaN or infinities and
    /// [`AlphaError::OutOfRange`] when `alpha` is not in `(MIN, MAX]`.
    pub fn new(alpha: f64) -> Result<Alpha, AlphaError> {
        if !alpha.is_finite() {
            return Err(AlphaError::NotFinite);
        }
        if alpha <= Self::MIN || alpha > Self::MAX {
            return Err(AlphaError::OutOfRange(alpha));
        }
        Ok(Alpha(alpha))
    }

    /// Returns the factor as a float.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Largest share of a child's weight its inner grandchild may hold
    /// before a single rotation stops being enough, `1 / (2 - α)`.
    pub(crate) fn single_rotation_limit(self) -> f64 {
        1.0 / (2.0 - self.0)
    }
}

impl Default for Alpha {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Debug for Alpha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "α={}", self.0)
    }
}

impl TryFrom<f64> for Alpha {
    type Error = AlphaError;

    fn try_from(alpha: f64) -> Result<Self, Self::Error> {
        Alpha::new(alpha)
    }
}

impl From<Alpha> for f64 {
    fn from(alpha: Alpha) -> f64 {
        alpha.0
    }
}
