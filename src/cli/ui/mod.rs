mod output;

pub use output::{Output, RULE_WIDTH};
