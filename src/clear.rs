//! Per-region clear policies applied by [`Arena::reset`](crate::Arena::reset).

use serde::Deserialize;

use crate::arena::Region;

/// What to do with one region on reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clear {
    /// Leave the region's contents as they are.
    #[default]
    Keep,
    /// Fill with zeros.
    Zero,
    /// Fill with [`UNDEFINED`](crate::UNDEFINED).
    Undefined,
}

/// One [`Clear`] policy per region.
///
/// ```
/// use graph_scratch::{Clear, ClearSpec, Region};
///
/// let spec = ClearSpec::none().zero(Region::A).undefined(Region::B);
/// assert_eq!(spec.get(Region::C), Clear::Keep);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClearSpec {
    policies: [Clear; 3],
}

impl ClearSpec {
    /// Leave every region untouched.
    #[inline]
    pub const fn none() -> Self {
        Self {
            policies: [Clear::Keep; 3],
        }
    }

    /// Explicit policies for A, B and C.
    #[inline]
    pub const fn new(a: Clear, b: Clear, c: Clear) -> Self {
        Self {
            policies: [a, b, c],
        }
    }

    /// Replace the policy for one region.
    #[must_use]
    #[inline]
    pub fn with(mut self, region: Region, clear: Clear) -> Self {
        self.policies[region.index()] = clear;
        self
    }

    /// Zero-fill `region`.
    #[must_use]
    #[inline]
    pub fn zero(self, region: Region) -> Self {
        self.with(region, Clear::Zero)
    }

    /// Sentinel-fill `region`.
    #[must_use]
    #[inline]
    pub fn undefined(self, region: Region) -> Self {
        self.with(region, Clear::Undefined)
    }

    /// Policy for `region`.
    #[inline]
    pub const fn get(&self, region: Region) -> Clear {
        self.policies[region.index()]
    }

    /// Returns true if no region is touched.
    pub fn is_noop(&self) -> bool {
        self.policies.iter().all(|&p| p == Clear::Keep)
    }

    /// Drop zero fills; a fresh buffer is already zeroed.
    pub(crate) fn without_zero_fills(mut self) -> Self {
        for policy in &mut self.policies {
            if *policy == Clear::Zero {
                *policy = Clear::Keep;
            }
        }
        self
    }
}
