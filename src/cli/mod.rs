mod memos;
mod root;
mod stats;

pub use root::Cli;
