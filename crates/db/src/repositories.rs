pub mod hospital;
pub mod news;
pub mod registration;
pub mod route;
pub mod schedule;
