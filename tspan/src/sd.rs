use super::{Span, SE};
use crate::common::*;

/// Temporal span in start-duration format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SD<T> {
    pub(crate) s: T,
    pub(crate) d: T,
}

impl<T> SD<T> {
    pub fn try_cast<V>(self) -> Option<SD<V>>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        Some(SD {
            s: V::from(self.s)?,
            d: V::from(self.d)?,
        })
    }

    pub fn cast<V>(self) -> SD<V>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        self.try_cast().unwrap()
    }
}

impl<T> Span for SD<T>
where
    T: Copy + Num + PartialOrd,
{
    type Type = T;

    fn s(&self) -> Self::Type {
        self.s
    }

    fn e(&self) -> Self::Type {
        self.s + self.d
    }

    fn c(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.s + self.d / two
    }

    fn d(&self) -> Self::Type {
        self.d
    }

    fn try_from_se(se: [Self::Type; 2]) -> Result<Self> {
        let [s, e] = se;
        ensure!(e >= s, "e >= s must hold");
        Ok(Self { s, d: e - s })
    }

    fn try_from_sd(sd: [Self::Type; 2]) -> Result<Self> {
        let [s, d] = sd;
        let zero = T::zero();
        ensure!(d >= zero, "d must be non-negative");
        Ok(Self { s, d })
    }
}

impl<T> From<SE<T>> for SD<T>
where
    T: Copy + Num,
{
    fn from(from: SE<T>) -> Self {
        Self::from(&from)
    }
}

impl<T> From<&SE<T>> for SD<T>
where
    T: Copy + Num,
{
    fn from(from: &SE<T>) -> Self {
        let SE { s, e } = *from;
        Self { s, d: e - s }
    }
}
