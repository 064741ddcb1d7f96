/// A tiny two-adic prime field, used only by unit tests elsewhere in this
/// crate where exercising the real 128-bit STARK field would make expected
/// values unwieldy to write down by hand.
pub mod u64_test_field;
