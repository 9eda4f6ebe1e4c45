//! Internal logging shims.
//!
//! With the `defmt` feature enabled these forward to the matching `defmt`
//! macros. Without it they expand to nothing, so log arguments must not be
//! the only use of a binding.

macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
    };
}

macro_rules! warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)*);
    };
}
