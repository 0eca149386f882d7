#![forbid(unsafe_code)]

mod history;
mod responses;
mod seed;

pub use history::*;
pub use responses::*;
pub use seed::*;
