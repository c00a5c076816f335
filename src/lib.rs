pub mod app;
pub mod cas;
pub mod error;
pub mod model;
pub mod request;
pub mod sign;

pub use app::AppLoginClient;
pub use cas::CasLoginClient;
pub use reqwest::Client;
