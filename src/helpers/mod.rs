pub mod helper;
pub mod system;
