pub mod browsing;
pub mod session;
pub mod transport;
