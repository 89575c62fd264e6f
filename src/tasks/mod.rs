//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Archival: Archives books past the age threshold at configured intervals

mod archival;

pub use archival::spawn_archival_task;
