//! Pool instantiation via the factory pattern.
//!
//! The [`DefaultPoolFactory`] creates pool instances from [`PoolConfig`]
//! values, validating configuration and dispatching to the appropriate
//! pool constructor based on the config variant.
//!
//! # Usage
//!
//! ```rust
//! use sand_buckets::config::StableSwapConfig;
//! use sand_buckets::domain::FeeRate;
//! use sand_buckets::factory::DefaultPoolFactory;
//! use sand_buckets::traits::SwapPool;
//!
//! let cfg = StableSwapConfig::new(2, 100.0)
//!     .expect("valid")
//!     .with_fee(FeeRate::LUSD_3CRV_SWAP)
//!     .with_balances(vec![1_000.0, 2_000.0]);
//!
//! let mut pool = DefaultPoolFactory::create(&cfg.into()).expect("pool created");
//! let dy = pool.exchange(0, 1, 10.0).expect("swap ok");
//! assert!(dy > 10.0);
//! ```
//!
//! # Feature Gating
//!
//! The meta pool arm is gated behind the `meta-pool` feature.  Passing a
//! [`PoolConfig::Meta`] without it returns
//! [`SimError::InvalidArgument`].
//!
//! [`PoolConfig`]: crate::config::PoolConfig
//! [`PoolConfig::Meta`]: crate::config::PoolConfig::Meta
//! [`SimError::InvalidArgument`]: crate::error::SimError::InvalidArgument

mod default_factory;

pub use default_factory::DefaultPoolFactory;
