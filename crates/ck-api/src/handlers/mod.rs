//! Function endpoint handlers

pub mod nudge;
pub mod video;

#[cfg(test)]
pub(crate) mod testing;
