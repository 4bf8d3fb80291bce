pub mod correction;
pub mod municipality;
