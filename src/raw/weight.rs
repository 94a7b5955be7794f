use core::num::NonZero;
use core::ops::Add;

/// The number of leaves below a node.
///
/// Every subtree holds at least one leaf, so the weight is never zero and
/// `Option<Weight>` stays pointer-sized.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[repr(transparent)]
pub(crate) struct Weight(NonZero<usize>);

impl Weight {
    pub(crate) const ONE: Self = Self(NonZero::<usize>::MIN);

    #[inline]
    pub(crate) const fn from_usize(weight: usize) -> Self {
        match NonZero::new(weight) {
            Some(weight) => Self(weight),
            None => panic!("`Weight::from_usize()` - `weight` is zero!"),
        }
    }

    #[inline]
    pub(crate) const fn get(self) -> usize {
        self.0.get()
    }

    /// Whether `self` is at least `alpha` of `total`.
    #[inline]
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn is_share_of(self, total: Self, alpha: f64) -> bool {
        self.get() as f64 >= alpha * total.get() as f64
    }

    /// `self / total` as a float.
    #[inline]
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn share_of(self, total: Self) -> f64 {
        self.get() as f64 / total.get() as f64
    }

    #[inline]
    pub(crate) fn decremented(self) -> Self {
        Self::from_usize(self.get() - 1)
    }
}

impl Add for Weight {
    type Output = Weight;

    #[inline]
    fn add(self, rhs: Weight) -> Weight {
        Weight(self.0.checked_add(rhs.get()).expect("`Weight::add()` - overflow!"))
    }
}
