pub mod beneficiaries;
pub mod bets;
pub mod users;

pub use beneficiaries as beneficiary_entity;
pub use bets as bet_entity;
pub use users as user_entity;
