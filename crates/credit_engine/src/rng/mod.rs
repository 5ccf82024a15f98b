//! # Random Number Generation
//!
//! Explicit, seedable random streams for the default simulation.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every stream is built from a `u64` seed and the
//!   seed is retained for logging
//! - **No global state**: callers construct a [`CreditRng`] and pass it
//!   down; nothing in the engine reaches for thread-local randomness
//! - **Sub-streams**: [`CreditRng::fork`] and [`CreditRng::next_seed`]
//!   derive child streams in a fixed order, so parallel work can be
//!   seeded independently of scheduling
//!
//! ## British English Convention
//!
//! Documentation in this crate uses British English spelling
//! ("initialise", "behaviour", "parallelise").
//!
//! ## Usage Example
//!
//! ```rust
//! use credit_engine::rng::CreditRng;
//!
//! let mut rng = CreditRng::from_seed(12345);
//!
//! // Uniform value in [0, 1)
//! let u = rng.gen_uniform();
//! assert!((0.0..1.0).contains(&u));
//!
//! // Independent child stream
//! let mut child = rng.fork();
//! let _ = child.gen_uniform();
//! ```

mod prng;

pub use prng::CreditRng;

#[cfg(test)]
mod tests;
