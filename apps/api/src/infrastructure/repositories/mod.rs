// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory_complaint_repository;
pub mod in_memory_worker_repository;

pub use in_memory_complaint_repository::InMemoryComplaintRepository;
pub use in_memory_worker_repository::InMemoryWorkerRepository;
