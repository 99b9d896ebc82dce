// Composition root for the golf module.
//
// Responsibilities
// - Read configuration from the environment.
// - Instantiate the configured GolfStore and wire it behind the repository facade.
// - Expose the REST routes and the GraphQL endpoint on one router.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
