pub mod create_campaign;
pub mod donate;
pub mod release;

pub use create_campaign::*;
pub use donate::*;
pub use release::*;
