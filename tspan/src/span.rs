use super::{SD, SE};
use crate::common::*;
use num_traits::Zero;

/// The generic temporal span.
pub trait Span {
    type Type;

    fn s(&self) -> Self::Type;
    fn e(&self) -> Self::Type;
    fn c(&self) -> Self::Type;
    fn d(&self) -> Self::Type;

    fn try_from_se(se: [Self::Type; 2]) -> Result<Self>
    where
        Self: Sized;

    fn try_from_sd(sd: [Self::Type; 2]) -> Result<Self>
    where
        Self: Sized;
}

pub trait SpanNum: Span
where
    Self::Type: Num + PartialOrd,
{
    fn from_se(se: [Self::Type; 2]) -> Self
    where
        Self: Sized,
    {
        Self::try_from_se(se).unwrap()
    }

    fn from_sd(sd: [Self::Type; 2]) -> Self
    where
        Self: Sized,
    {
        Self::try_from_sd(sd).unwrap()
    }

    fn se(&self) -> [Self::Type; 2] {
        [self.s(), self.e()]
    }

    fn sd(&self) -> [Self::Type; 2] {
        [self.s(), self.d()]
    }

    fn to_se(&self) -> SE<Self::Type> {
        SE {
            s: self.s(),
            e: self.e(),
        }
    }

    fn to_sd(&self) -> SD<Self::Type> {
        SD {
            s: self.s(),
            d: self.d(),
        }
    }
}

pub trait SpanFloat: SpanNum
where
    Self::Type: Float,
{
    fn intersect_with<S>(&self, other: &S) -> Option<SE<Self::Type>>
    where
        S: Span<Type = Self::Type>,
    {
        let s = self.s().max(other.s());
        let e = self.e().min(other.e());
        (e > s).then(|| SE::from_se([s, e]))
    }

    fn intersection_len_with<S>(&self, other: &S) -> Self::Type
    where
        S: Span<Type = Self::Type>,
    {
        self.intersect_with(other)
            .map(|span| span.d())
            .unwrap_or_else(Self::Type::zero)
    }

    /// Intersection length over union length. Either span must have
    /// positive length.
    fn iou_with<S>(&self, other: &S) -> Self::Type
    where
        S: Span<Type = Self::Type>,
    {
        let inter_len = self.intersection_len_with(other);
        let union_len = self.d() + other.d() - inter_len;
        inter_len / union_len
    }

    /// Intersection length over this span's own length. This span must
    /// have positive length.
    fn ioa_with<S>(&self, other: &S) -> Self::Type
    where
        S: Span<Type = Self::Type>,
    {
        self.intersection_len_with(other) / self.d()
    }
}

impl<T> SpanNum for T
where
    T: Span,
    T::Type: Num + PartialOrd,
{
}

impl<T> SpanFloat for T
where
    T: Span,
    T::Type: Float,
{
}
