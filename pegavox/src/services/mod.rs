pub mod artifacts;
pub mod printer;
pub mod render;
pub mod session;
