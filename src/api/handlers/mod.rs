pub mod admin_auth;
pub use self::admin_auth::admin_auth;

pub mod health;
pub use self::health::health;

pub mod root;
pub use self::root::root;
