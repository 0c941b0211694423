pub mod check;
pub mod completion;
pub mod init;
pub mod kinds;
