pub mod beneficiary_service;
pub mod bet_service;
pub mod draw_service;
pub mod user_service;

pub use beneficiary_service::*;
pub use bet_service::*;
pub use draw_service::*;
pub use user_service::*;
