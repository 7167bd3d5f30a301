pub mod auth;
pub mod calendar;
pub mod dashboard;
pub mod entity_list;
pub mod seed;
pub mod task_query;
pub mod workspace;
