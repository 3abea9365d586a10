//! Async job lifecycle for Sentio.
//!
//! Admits long-running analysis requests, hands them to an external
//! workflow, and lets status be polled independently of the triggering
//! request's lifetime.

pub mod memory;
pub mod service;
pub mod trigger;
pub mod worker;

pub use memory::MemoryJobRepository;
pub use service::{AdmissionTicket, JobService, SubmitRequest};
pub use trigger::{HttpWorkflowTrigger, LocalWorkflowTrigger};
pub use worker::DocumentProcessor;
