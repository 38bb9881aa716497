pub mod outline;
pub mod replay;
