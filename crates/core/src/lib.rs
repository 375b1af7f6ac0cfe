//! Core engine for the multi-step attendance check-in wizard.
//!
//! Everything the presentation shell needs to drive the branching form
//! lives here: the step sequencer ([`wizard`]), field format checks
//! ([`validation`]), the debounced employee lookup flow ([`debounce`],
//! [`lookup`]), the activity catalog snapshot ([`catalog`]) and record
//! submission ([`submit`]). Network and persistence collaborators are
//! reached through the port traits defined next to their consumers
//! ([`lookup::EmployeeDirectory`], [`catalog::ActivityCatalog`],
//! [`submit::AttendanceStore`]), so the engine itself carries no HTTP or
//! database dependency.

pub mod catalog;
pub mod debounce;
pub mod domain;
pub mod error;
pub mod lookup;
pub mod signature;
pub mod submit;
pub mod types;
pub mod validation;
pub mod wizard;
