pub mod config;
pub mod context;
pub mod event;
pub mod github;
pub mod guard;
pub mod link;
pub mod marker;
pub mod unassign;
