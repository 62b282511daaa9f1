use clap::{Args, Subcommand};

mod mark_paid;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// Record that payment for an order arrived
    MarkPaid(mark_paid::MarkPaidArgs),
}

pub(crate) async fn run(command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::MarkPaid(args) => mark_paid::run(args).await,
    }
}
