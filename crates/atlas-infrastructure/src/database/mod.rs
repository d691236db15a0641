//! Database module (store adapters)

pub mod connection;
pub mod memory;
pub mod postgres;

pub use connection::create_pool;
pub use memory::MemTenantStore;
pub use postgres::PgTenantStore;
