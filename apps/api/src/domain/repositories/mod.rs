// Repository ports
// Implemented by adapters in the infrastructure layer

pub mod complaint_repository;
pub mod worker_repository;

pub use complaint_repository::ComplaintRepository;
pub use worker_repository::WorkerRepository;
