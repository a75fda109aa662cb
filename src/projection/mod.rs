//! Forward projections of book value under a chosen method.

pub mod schedule;
