//! Page state models.
//!
//! Each page owns its local state and drives backend calls through a
//! [`CatalogApi`](crate::api::CatalogApi), recording progress in a
//! [`FetchState`](crate::state::FetchState).

mod home;
mod product;
mod register;
mod search;

pub use home::HomePage;
pub use product::{ProductPage, LOAD_FAILED_MESSAGE};
pub use register::{RegisterPage, RegistrationForm};
pub use search::SearchPage;
