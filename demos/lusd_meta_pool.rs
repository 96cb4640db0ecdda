//! LUSD/3pool-style meta pool built from a JSON snapshot.
//!
//! Loads a [`PoolConfig`] the way a test would after cloning on-chain
//! pools, then prints virtual prices and quotes for swaps between LUSD and
//! the base pool's underlying stablecoins.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=sand_buckets=trace cargo run --example lusd_meta_pool
//! ```

use sand_buckets::config::PoolConfig;
use sand_buckets::factory::DefaultPoolFactory;
use sand_buckets::traits::{PoolState, SwapPool};
use tracing_subscriber::EnvFilter;

const SNAPSHOT: &str = r#"{
    "meta": {
        "amplification": 500.0,
        "fee": 0.0004,
        "admin_fee": 0.5,
        "balances": [52000000.0, 48000000.0],
        "base": {
            "n": 3,
            "amplification": 2000.0,
            "fee": 0.0001,
            "admin_fee": 0.5,
            "balances": [310000000.0, 295000000.0, 140000000.0]
        }
    }
}"#;

const UNDERLYING: [&str; 4] = ["LUSD", "DAI", "USDC", "USDT"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // ── 1. Build the pools ──────────────────────────────────────────────
    let config: PoolConfig = serde_json::from_str(SNAPSHOT)?;
    println!("=== {config} ===\n");

    let pool = DefaultPoolFactory::create(&config)?;
    let meta = pool.as_meta().ok_or("snapshot is not a meta pool")?;
    let base = meta.base_pool();

    println!("base virtual price: {:.12}", base.virtual_price()?);
    println!("meta virtual price: {:.12}", meta.virtual_price()?);
    println!("meta rates:         {:?}\n", meta.rates()?);

    // ── 2. Direct swaps ─────────────────────────────────────────────────
    let dx = 1e6;
    let lusd_for_lp = meta.dy(0, 1, dx)?;
    println!(
        "{dx} LUSD -> {:.6} 3CRV (fee {:.6})",
        lusd_for_lp.dy(),
        lusd_for_lp.fee()
    );
    let dai_for_usdc = base.dy(0, 1, dx)?;
    println!("{dx} DAI  -> {:.6} USDC\n", dai_for_usdc.dy());

    // ── 3. Underlying routes ────────────────────────────────────────────
    for (i, from) in UNDERLYING.iter().enumerate() {
        for (j, to) in UNDERLYING.iter().enumerate() {
            if i != j {
                let dy = meta.dy_underlying(i, j, dx)?;
                println!("{dx} {from:<4} -> {dy:>14.6} {to}");
            }
        }
    }

    Ok(())
}
