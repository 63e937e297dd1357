//! Calendar synchronization layer.
//!
//! # Responsibility
//! - Expose the provider SPI, the runtime registry, and the push-based
//!   meeting sync built on top of them.
//!
//! # Invariants
//! - The core never talks to a vendor API directly; everything crosses
//!   [`provider_spi::ProviderSpi`].

pub mod calendar_sync;
pub mod provider_registry;
pub mod provider_spi;
pub mod provider_types;
