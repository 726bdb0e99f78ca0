pub mod init;
pub mod notify;
pub mod status;
pub mod streaks;
pub mod track;
