pub mod beneficiary;
pub mod bet;
pub mod draw;
pub mod stream;
pub mod user;

pub use beneficiary::beneficiary_config;
pub use bet::bet_config;
pub use draw::draw_config;
pub use stream::stream_config;
pub use user::bettor_config;
