pub mod classify;
pub mod markdown;
pub mod output;
