pub mod rank;
pub mod replay;
