pub mod catalog;
pub mod stop;
pub mod trip;
pub mod trip_activity;
pub mod trip_cost;
pub mod user;
