//! Response DTOs that are not part of the dispatch domain.

pub mod response;
