pub mod build;
pub mod init;
pub mod parse;
pub mod serve;
