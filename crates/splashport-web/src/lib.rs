// splashport-web: operator-facing wizard server.
//
// Library target exists so integration tests can build the router
// in-process; the `splashport` binary is a thin wrapper in main.rs.

pub mod routes;
pub mod state;
pub mod views;
