#![allow(clippy::float_cmp, clippy::cast_precision_loss)]

mod cancellation;
mod direction;
mod failures;
mod invariants;
mod support;
mod workflow;
