pub mod api_util;
pub mod cache;
pub mod levels;
pub mod rank;
pub mod report;
pub mod reset;
pub mod stat;
pub mod teams;
