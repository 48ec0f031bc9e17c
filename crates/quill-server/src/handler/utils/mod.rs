//! Router helpers shared by the handlers.

mod custom_routes;

pub use custom_routes::CustomRoutes;
