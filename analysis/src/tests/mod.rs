#[cfg(test)]
mod decoder_tests;
