// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod complaint;
pub mod location;
pub mod repositories;
pub mod worker;
