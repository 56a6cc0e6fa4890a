use super::{Span, SD};
use crate::common::*;

/// Temporal span in start-end format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SE<T> {
    pub(crate) s: T,
    pub(crate) e: T,
}

impl<T> SE<T> {
    pub fn try_cast<V>(self) -> Option<SE<V>>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        Some(SE {
            s: V::from(self.s)?,
            e: V::from(self.e)?,
        })
    }

    pub fn cast<V>(self) -> SE<V>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        self.try_cast().unwrap()
    }
}

impl<T> Span for SE<T>
where
    T: Copy + Num + PartialOrd,
{
    type Type = T;

    fn s(&self) -> Self::Type {
        self.s
    }

    fn e(&self) -> Self::Type {
        self.e
    }

    fn c(&self) -> Self::Type {
        let two = T::one() + T::one();
        (self.s + self.e) / two
    }

    fn d(&self) -> Self::Type {
        self.e - self.s
    }

    fn try_from_se(se: [Self::Type; 2]) -> Result<Self> {
        let [s, e] = se;
        ensure!(e >= s, "e >= s must hold");
        Ok(Self { s, e })
    }

    fn try_from_sd(sd: [Self::Type; 2]) -> Result<Self> {
        let [s, d] = sd;
        let zero = T::zero();
        ensure!(d >= zero, "d must be non-negative");
        Ok(Self { s, e: s + d })
    }
}

impl<T> From<SD<T>> for SE<T>
where
    T: Copy + Num,
{
    fn from(from: SD<T>) -> Self {
        Self::from(&from)
    }
}

impl<T> From<&SD<T>> for SE<T>
where
    T: Copy + Num,
{
    fn from(from: &SD<T>) -> Self {
        let SD { s, d } = *from;
        Self { s, e: s + d }
    }
}
