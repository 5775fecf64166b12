//! 192-bit unsigned accumulator.
//!
//! A decoded token already spans the full `u128` range, so ten million of
//! them overflow a `u128`. The extra 64-bit limb absorbs the carries.

use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
};

#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WideSum {
    // Field order gives the derived `Ord` numeric meaning.
    hi: u64,
    lo: u128,
}

impl WideSum {
    pub const ZERO: Self = Self { hi: 0, lo: 0 };
    pub const MAX: Self = Self {
        hi: u64::MAX,
        lo: u128::MAX,
    };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn to_u128(self) -> Option<u128> {
        (self.hi == 0).then_some(self.lo)
    }

    /// Limbs from most to least significant.
    fn limbs(self) -> [u64; 3] {
        [self.hi, (self.lo >> 64) as u64, self.lo as u64]
    }

    fn from_limbs([hi, mid, lo]: [u64; 3]) -> Self {
        Self {
            hi,
            lo: (mid as u128) << 64 | lo as u128,
        }
    }

    /// Schoolbook long division by a single limb.
    ///
    /// Panics if `divisor` is zero.
    pub fn div_rem_u64(self, divisor: u64) -> (Self, u64) {
        let divisor = divisor as u128;
        let mut rem = 0u128;
        let mut quotient = [0u64; 3];
        for (q, limb) in quotient.iter_mut().zip(self.limbs()) {
            let cur = rem << 64 | limb as u128;
            *q = (cur / divisor) as u64;
            rem = cur % divisor;
        }
        (Self::from_limbs(quotient), rem as u64)
    }

    /// Integer mean over `count` items; zero when there are none.
    pub fn div_count(self, count: usize) -> Self {
        if count == 0 {
            return Self::ZERO;
        }
        self.div_rem_u64(count as u64).0
    }
}

impl From<u128> for WideSum {
    fn from(lo: u128) -> Self {
        Self { hi: 0, lo }
    }
}

impl AddAssign<u128> for WideSum {
    #[inline]
    fn add_assign(&mut self, rhs: u128) {
        let (lo, carry) = self.lo.overflowing_add(rhs);
        self.lo = lo;
        self.hi = self.hi.wrapping_add(carry as u64);
    }
}

impl AddAssign for WideSum {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        let (lo, carry) = self.lo.overflowing_add(rhs.lo);
        self.lo = lo;
        self.hi = self.hi.wrapping_add(rhs.hi).wrapping_add(carry as u64);
    }
}

impl Add for WideSum {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl Sum<u128> for WideSum {
    fn sum<I: Iterator<Item = u128>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |mut acc, x| {
            acc += x;
            acc
        })
    }
}

impl Sum for WideSum {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for WideSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const BASE: u64 = 10_000_000_000_000_000_000; // 10^19, largest power of ten in a u64

        let mut groups = vec![];
        let mut rest = *self;
        loop {
            let (q, r) = rest.div_rem_u64(BASE);
            groups.push(r);
            if q.is_zero() {
                break;
            }
            rest = q;
        }

        let mut digits = String::with_capacity(groups.len() * 19);
        let mut groups = groups.into_iter().rev();
        if let Some(first) = groups.next() {
            digits.push_str(&first.to_string());
        }
        for group in groups {
            digits.push_str(&format!("{:019}", group));
        }
        f.pad(&digits)
    }
}

impl fmt::Debug for WideSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WideSum({})", self)
    }
}
