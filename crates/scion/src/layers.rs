//! # Layer Masks
//!
//! A [`LayersMask`] is a 32-bit membership set: bit `i` means "on layer
//! `i`". Every edit takes the mask by value and hands back the edited copy,
//! so a failed edit leaves the caller's mask exactly as it was.
//!
//! ```ignore
//! let mask = LayersMask::NONE.add_layers(&[0, 3])?;
//! assert_eq!(mask.mask, 0b1001);
//!
//! // 40 is rejected before 5 is applied.
//! assert!(mask.add_layers(&[5, 40]).is_err());
//! ```
//!
//! Layer indices are `i32` so negative input can be represented and
//! rejected; the valid range is `0..=31`.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Highest valid layer index.
pub const MAX_LAYER: u32 = 31;

/// Number of layers in a mask (and rows in a collision matrix).
pub const LAYER_COUNT: usize = MAX_LAYER as usize + 1;

/// Check that `index` is a layer index and return it as a bit position.
pub fn check_layer(index: i32) -> Result<u32> {
    match u32::try_from(index) {
        Ok(i) if i <= MAX_LAYER => Ok(i),
        _ => Err(Error::OutOfRange {
            value: index.into(),
            max: MAX_LAYER,
        }),
    }
}

/// Validate every index before any is applied; fails on the first bad one.
fn check_layers(indices: &[i32]) -> Result<u32> {
    indices
        .iter()
        .try_fold(0u32, |bits, &i| -> Result<u32> { Ok(bits | (1 << check_layer(i)?)) })
}

/// A 32-layer membership bitmask.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayersMask {
    pub mask: u32,
}

impl LayersMask {
    pub const NONE: Self = Self { mask: 0 };
    pub const ALL: Self = Self { mask: u32::MAX };

    pub const fn new(mask: u32) -> Self {
        Self { mask }
    }

    /// A mask containing exactly `indices`.
    pub fn from_layers(indices: &[i32]) -> Result<Self> {
        Self::NONE.set_layers_as(indices)
    }

    /// Set bit `index`. Idempotent.
    pub fn add_layer(self, index: i32) -> Result<Self> {
        let bit = check_layer(index)?;
        Ok(Self::new(self.mask | (1 << bit)))
    }

    pub fn add_layers(self, indices: &[i32]) -> Result<Self> {
        let bits = check_layers(indices)?;
        Ok(Self::new(self.mask | bits))
    }

    /// Clear bit `index`. Idempotent.
    pub fn remove_layer(self, index: i32) -> Result<Self> {
        let bit = check_layer(index)?;
        Ok(Self::new(self.mask & !(1 << bit)))
    }

    pub fn remove_layers(self, indices: &[i32]) -> Result<Self> {
        let bits = check_layers(indices)?;
        Ok(Self::new(self.mask & !bits))
    }

    /// Replace the whole mask with just `index`.
    pub fn set_layer_as(self, index: i32) -> Result<Self> {
        let bit = check_layer(index)?;
        Ok(Self::new(1 << bit))
    }

    /// Replace the whole mask with exactly `indices`.
    pub fn set_layers_as(self, indices: &[i32]) -> Result<Self> {
        Ok(Self::new(check_layers(indices)?))
    }

    pub fn contains(self, index: i32) -> Result<bool> {
        let bit = check_layer(index)?;
        Ok(self.mask & (1 << bit) != 0)
    }

    /// Set layer indices, lowest first.
    pub fn layers(self) -> impl Iterator<Item = u32> {
        (0..=MAX_LAYER).filter(move |&i| self.mask & (1 << i) != 0)
    }

    pub fn is_empty(self) -> bool {
        self.mask == 0
    }
}

impl From<u32> for LayersMask {
    fn from(mask: u32) -> Self {
        Self::new(mask)
    }
}

impl From<LayersMask> for u32 {
    fn from(mask: LayersMask) -> Self {
        mask.mask
    }
}

impl BitOr for LayersMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self::new(self.mask | rhs.mask)
    }
}

impl BitAnd for LayersMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self::new(self.mask & rhs.mask)
    }
}

impl Not for LayersMask {
    type Output = Self;
    fn not(self) -> Self {
        Self::new(!self.mask)
    }
}

impl fmt::Debug for LayersMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayersMask({:#034b})", self.mask)
    }
}

impl fmt::Display for LayersMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032b}", self.mask)
    }
}
