use clap::Args;
use storefront::{money::format_chf, order_numbers::OrderNumber};
use storefront_app::{
    database::{self, Db},
    domain::orders::{OrdersService, PgOrdersService},
};

#[derive(Debug, Args)]
pub(crate) struct MarkPaidArgs {
    /// Three-digit order number
    #[arg(long)]
    order_number: OrderNumber,

    /// Mark the order unpaid instead
    #[arg(long)]
    unpaid: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: MarkPaidArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgOrdersService::new(Db::new(pool));

    let order = service
        .get_order_by_number(args.order_number)
        .await
        .map_err(|error| format!("failed to find order #{}: {error}", args.order_number))?;

    let order = service
        .set_paid(order.uuid, !args.unpaid)
        .await
        .map_err(|error| format!("failed to update order #{}: {error}", args.order_number))?;

    println!("order_number: {}", order.order_number);
    println!("total: {}", format_chf(order.total));
    println!("paid: {}", order.is_paid);

    Ok(())
}
