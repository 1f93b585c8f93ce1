mod route_guards;

pub use route_guards::protect_route;
