//! Data contracts shared between the shop back-office backend and its clients.

pub mod dashboards;
pub mod domain;
pub mod shared;
