#![allow(clippy::panic_in_result_fn)]

mod building;
mod federation;
mod materialize;
mod test_utils;
mod union;
