pub mod commands;
pub mod ui;
pub mod util;

pub use ui::Output;
pub use util::{load_request, load_result, read_input, write_output};
