pub mod init;
pub mod questions;
pub mod score;
pub mod serve;
pub mod take;
