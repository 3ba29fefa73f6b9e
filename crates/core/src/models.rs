pub mod hospital;
pub mod news;
pub mod route;
pub mod schedule;
