pub mod check;
pub mod extract;
pub mod init;
pub mod scan;
