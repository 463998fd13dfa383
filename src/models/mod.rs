pub mod beneficiary;
pub mod bet;
pub mod common;
pub mod draw;
pub mod pagination;
pub mod user;

pub use beneficiary::*;
pub use bet::*;
pub use common::*;
pub use draw::*;
pub use pagination::*;
pub use user::*;
