pub mod helpers;
pub mod output;

#[cfg(test)]
mod test_utils;
