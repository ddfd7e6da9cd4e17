//! Access to the T Cube time tracking service.
//!  - [api::TimeSheetApi] is the raw REST surface, [api::HttpTimeSheetApi] its reqwest realization.
//!  - [client::TimeSheetClient] locates weeks and flattens sheets into [entities::TimeEntry].

pub mod api;
pub mod client;
pub mod entities;
