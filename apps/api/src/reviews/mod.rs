// Review listing: normalization, filtering and the list endpoint.
// Everything here except the handler is pure and recomputed per request.

pub mod filter;
pub mod handlers;
pub mod normalize;
pub mod query;
