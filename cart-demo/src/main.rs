use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use cart_application::{CartService, CartServiceConfig};
use cart_domain::source::{CartDataSource, InMemoryCartDataSource, JsonFileCartDataSource};
use cart_domain::{CartItem, Product, ProductId};
use clap::Parser;
use futures_util::StreamExt;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

/// 购物车演示：载入已保存的条目，执行一组加/减操作，并打印订阅到的更新
#[derive(Debug, Parser)]
#[command(name = "cart-demo", version)]
struct Args {
    /// 已保存条目的 JSON 文件；省略时使用内置示例数据
    #[arg(long)]
    stored: Option<PathBuf>,

    /// 新订阅者立即收到当前快照
    #[arg(long)]
    replay: bool,

    /// 载入的最大尝试次数
    #[arg(long, default_value_t = 1)]
    load_attempts: u32,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // 可通过 RUST_LOG 调整，例如 RUST_LOG=cart_application=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn sample_items() -> Result<Vec<CartItem>> {
    let tote = Product::builder()
        .id(ProductId::new(7))
        .price(Decimal::new(1800, 2))
        .name("Canvas tote")
        .build();
    Ok(vec![CartItem::new(tote, 1)?])
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let source: Arc<dyn CartDataSource> = match args.stored {
        Some(path) => Arc::new(JsonFileCartDataSource::new(path)),
        None => Arc::new(InMemoryCartDataSource::new(sample_items()?)),
    };
    let config = CartServiceConfig::builder()
        .replay_on_subscribe(args.replay)
        .load_attempts(args.load_attempts)
        .build();
    let cart = CartService::new(source, config)?;

    let mug = Product::builder()
        .id(ProductId::new(1))
        .price(Decimal::from(10))
        .name("Mug")
        .build();
    let pen = Product::builder()
        .id(ProductId::new(2))
        .price(Decimal::from(5))
        .name("Pen")
        .build();

    let mut totals = cart.total_updates();
    let total_view = tokio::spawn(async move {
        while let Some(total) = totals.next().await {
            println!("total    -> {total}");
        }
    });

    let mut mug_updates = cart.item_updates(mug.id());
    let mug_view = tokio::spawn(async move {
        while let Some(item) = mug_updates.next().await {
            match item {
                Some(item) => println!("mug line -> {} x {}", item.amount(), item.subtotal()),
                None => println!("mug line -> (not in cart)"),
            }
        }
    });

    let outcome = cart.load_stored_items().await?;
    tracing::info!(?outcome, "load finished");

    cart.add_product(mug.clone())?;
    cart.add_product(mug.clone())?;
    cart.add_product(pen)?;
    let removed = cart.remove_product(&mug, false)?;
    tracing::info!(?removed, "removed one mug");
    let removed = cart.remove_product(&mug, true)?;
    tracing::info!(?removed, "removed all mugs");

    println!("{}", serde_json::to_string_pretty(&cart.snapshot())?);

    // 服务释放后总线关闭，订阅流随之结束
    drop(cart);
    total_view.await?;
    mug_view.await?;
    Ok(())
}
