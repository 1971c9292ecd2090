pub mod decision;
pub mod routes;

pub use decision::AccessGate;
pub use decision::AuthDecision;
pub use routes::RouteClass;
pub use routes::RouteTable;
