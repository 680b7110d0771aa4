pub mod routes;
pub mod startup;
pub mod errors;
pub mod openapi;
pub mod state;

pub use startup::run;
pub use state::ServerState;
