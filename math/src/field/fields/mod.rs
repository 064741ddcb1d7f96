/// The fixed 128-bit prime field `1 + 407*2^119` used throughout this crate.
pub mod stark_anatomy_prime_field;
