//! Command Line Interface for the concentrated-liquidity fee estimator.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use prettytable::{Table, row};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::env;
use tracing::warn;
use univ3_fee_data::{
    GasCostReader, MarketDataClient, Network, PoolEvent, PoolStateReader, PriceHistoryReader,
    QueryPeriod, RpcClient, RpcGasScanner, RpcPoolReader, SubgraphClient, TickReader, VolumeReader,
};
use univ3_fee_domain::entities::Token;
use univ3_fee_domain::math::{
    aggregate_gross_liquidity, allocate_deposit, compute_liquidity, tick_range,
};
use univ3_fee_domain::metrics::estimate_fee_and_yield;
use univ3_fee_domain::value_objects::{Percentage, PriceRange};

// WETH/USDC 0.05% pool on Arbitrum.
const DEFAULT_POOL: &str = "0xC31E54c7a869B9FcBEcc14363CF510d1c41fa443";

#[derive(Parser)]
#[command(name = "univ3-fee")]
#[command(about = "Trading-fee yield estimator for concentrated liquidity positions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate fee income and APY for a USD deposit over a price range
    Estimate {
        /// Pool contract address
        #[arg(short, long, default_value = DEFAULT_POOL)]
        pool: String,

        /// Network id (ethereum, arbitrum)
        #[arg(short, long, default_value = "arbitrum")]
        network: String,

        /// Deposit target in USD
        #[arg(short, long, default_value_t = 1000.0)]
        deposit: f64,

        /// Range half-width around the current price, in percent
        #[arg(short, long, default_value_t = 2.0)]
        range_pct: f64,

        /// Days of daily volume history to average
        #[arg(long, default_value_t = 7)]
        days: u32,

        /// CoinGecko id for token0's USD price chart
        #[arg(long, default_value = "ethereum")]
        coin: String,

        /// Token0 decimals
        #[arg(long, default_value_t = 18)]
        decimals0: u8,

        /// Token1 decimals
        #[arg(long, default_value_t = 6)]
        decimals1: u8,
    },
    /// Average gas cost of recent Mint and Swap transactions for a pool
    Gas {
        /// Pool contract address
        #[arg(short, long, default_value = DEFAULT_POOL)]
        pool: String,

        /// Network id (ethereum, arbitrum)
        #[arg(short, long, default_value = "arbitrum")]
        network: String,

        /// First block of the log scan window
        #[arg(long, default_value_t = 119_567_200)]
        from_block: u64,

        /// Max transactions sampled per event type
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn resolve_network(id: &str) -> Result<Network> {
    let mut network =
        Network::by_id(id).with_context(|| format!("unknown network {id}, try ethereum|arbitrum"))?;
    if let Ok(url) = env::var("RPC_URL") {
        network = network.with_rpc_url(url);
    }
    Ok(network)
}

#[allow(clippy::too_many_arguments)]
async fn run_estimate(
    pool: String,
    network: String,
    deposit: f64,
    range_pct: f64,
    days: u32,
    coin: String,
    decimals0: u8,
    decimals1: u8,
) -> Result<()> {
    let network = resolve_network(&network)?;
    let deposit_usd = Decimal::from_f64(deposit).context("deposit is not a valid number")?;
    let half_width = Decimal::from_f64(range_pct / 100.0).context("invalid range percent")?;

    // Token pair assumed WETH/USDC unless decimals say otherwise.
    let token0 = Token::new(
        "0x82aF49447D8a07e3bd95BD0d56f35241523fBab1",
        "WETH",
        decimals0,
        "Wrapped Ether",
    )
    .with_coingecko_id(coin);
    let token1 = Token::new(
        "0xFF970A61A04b1cA14834A43f5dE4533eBDDB5CC8",
        "USDC",
        decimals1,
        "USD Coin",
    );

    println!("📡 Reading pool state from {}...", network.name);
    let pool_reader = RpcPoolReader::new(RpcClient::new(&network.rpc_url));
    let snapshot = pool_reader.fetch_pool(&pool).await?;

    let price = snapshot.human_price(token0.decimals, token1.decimals)?;
    let lower = price * (Decimal::ONE - half_width);
    let upper = price * (Decimal::ONE + half_width);
    let range = PriceRange::bounded(lower, upper)?;
    let (tick_lower, tick_upper) = tick_range(
        &range,
        token0.decimals,
        token1.decimals,
        snapshot.tick_spacing,
    )?;

    println!(
        "🔍 Current price {:.4}, range [{:.4}, {:.4}] -> ticks [{}, {}]",
        price.round_dp(4),
        lower.round_dp(4),
        upper.round_dp(4),
        tick_lower,
        tick_upper
    );

    let subgraph = SubgraphClient::new(&network.subgraph_endpoint);
    let market = MarketDataClient::new();
    let coin_id = token0.coingecko_id.as_deref().unwrap_or("ethereum");
    let (ticks, avg_volume, chart) = tokio::try_join!(
        subgraph.fetch_ticks(&pool, tick_lower, tick_upper),
        subgraph.average_daily_volume(&pool, days),
        market.price_history(coin_id, QueryPeriod::OneMonth),
    )?;

    let total_liquidity = if ticks.is_empty() {
        warn!("no tick data in range, falling back to the pool's own liquidity");
        snapshot.liquidity
    } else {
        aggregate_gross_liquidity(&ticks)
    };

    let price_usd0 = chart.current_price_usd().unwrap_or(price);
    let price_usd1 = Decimal::ONE;

    let allocation = allocate_deposit(price, lower, upper, price_usd0, price_usd1, deposit_usd)?;
    let delta_l = compute_liquidity(
        lower,
        price,
        upper,
        allocation.amount0,
        token0.decimals,
        allocation.amount1,
        token1.decimals,
    )?;
    let result = estimate_fee_and_yield(
        delta_l,
        total_liquidity,
        avg_volume,
        snapshot.fee_tier_bps,
        price,
        lower,
        upper,
        deposit_usd,
        allocation,
    )?;

    println!("\n📊 Position estimate");
    let mut table = Table::new();
    table.add_row(row!["Deposit (USD)", format!("{}", deposit_usd.round_dp(2))]);
    table.add_row(row![
        format!("{} leg", token0.symbol),
        format!(
            "{} (~{} USD)",
            result.allocation.amount0.round_dp(6),
            result.allocation.value0_usd.round_dp(2)
        )
    ]);
    table.add_row(row![
        format!("{} leg", token1.symbol),
        format!(
            "{} (~{} USD)",
            result.allocation.amount1.round_dp(6),
            result.allocation.value1_usd.round_dp(2)
        )
    ]);
    let fee_pct = Percentage::from_fee_tier(snapshot.fee_tier_bps).0 * Decimal::from(100);
    table.add_row(row!["Fee tier", format!("{}%", fee_pct.round_dp(3))]);
    table.add_row(row![
        "Avg daily volume (USD)",
        format!("{}", avg_volume.round_dp(0))
    ]);
    table.add_row(row![
        "Est. daily fees (USD)",
        format!("{}", result.estimated_fee_usd.round_dp(4))
    ]);
    table.add_row(row![
        "Annualized yield",
        format!("{}%", result.annualized_yield_pct.round_dp(2))
    ]);
    table.add_row(row![
        "Daily income",
        format!("{}", result.daily_income_usd.round_dp(4))
    ]);
    table.printstd();

    Ok(())
}

async fn run_gas(pool: String, network: String, from_block: u64, limit: usize) -> Result<()> {
    let network = resolve_network(&network)?;
    let scanner = RpcGasScanner::new(RpcClient::new(&network.rpc_url));

    println!("⛽ Sampling recent pool transactions on {}...", network.name);
    let mint_avg = scanner
        .average_event_gas(&pool, PoolEvent::Mint, from_block, limit)
        .await?;
    println!("Mint average gas cost: {} ETH", mint_avg.round_dp(6));

    let swap_avg = scanner
        .average_event_gas(&pool, PoolEvent::Swap, from_block, limit)
        .await?;
    println!("Swap average gas cost: {} ETH", swap_avg.round_dp(6));

    println!(
        "Total (Swap+Mint) average: {} ETH",
        (mint_avg + swap_avg).round_dp(6)
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate {
            pool,
            network,
            deposit,
            range_pct,
            days,
            coin,
            decimals0,
            decimals1,
        } => {
            run_estimate(
                pool, network, deposit, range_pct, days, coin, decimals0, decimals1,
            )
            .await
        }
        Commands::Gas {
            pool,
            network,
            from_block,
            limit,
        } => run_gas(pool, network, from_block, limit).await,
    }
}
