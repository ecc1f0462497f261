use core::fmt;

/// Default activation/threshold width.
///
/// Eight bits is plenty for hand-wired networks and keeps the state vectors
/// small; wider types are available through [`Level`].
pub type Activation = i8;

/// Fixed-width signed integer used for activations, thresholds and biases.
///
/// All arithmetic the network performs goes through [`Level::saturating_add`],
/// so driving a neuron past the type bounds clamps at `MIN`/`MAX` instead of
/// wrapping around and flipping its sign.
pub trait Level:
    Copy + Ord + Default + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    const ZERO: Self;
    const ONE: Self;
    const MIN: Self;
    const MAX: Self;

    fn saturating_add(self, rhs: Self) -> Self;
}

macro_rules! impl_level {
    ($($t:ty),* $(,)?) => {
        $(
            impl Level for $t {
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;

                #[inline]
                fn saturating_add(self, rhs: Self) -> Self {
                    <$t>::saturating_add(self, rhs)
                }
            }
        )*
    };
}

impl_level!(i8, i16, i32, i64);
