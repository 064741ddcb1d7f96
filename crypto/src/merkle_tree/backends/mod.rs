pub mod blake2b;
