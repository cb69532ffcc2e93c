//! Compute layer for the tag map pipeline.
//!
//! Each stage is a plain function over borrowed inputs:
//! - Clustering and level-of-detail extraction (`cluster`)
//! - Tag aggregation (`aggregate`)
//! - Font scaling (`scale`)
//! - Greedy spiral layout (`layout`)
//! - Colour mapping (`color`)
//!
//! [`crate::TagMapper`] strings them together and owns the cached trees.

pub mod aggregate;
pub mod cluster;
pub mod color;
pub mod layout;
pub mod scale;
pub mod validation;
