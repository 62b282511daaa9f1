use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct PromoCodesCommand {
    #[command(subcommand)]
    command: PromoCodesSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromoCodesSubcommand {
    /// Create a promo code
    Create(create::CreatePromoCodeArgs),
}

pub(crate) async fn run(command: PromoCodesCommand) -> Result<(), String> {
    match command.command {
        PromoCodesSubcommand::Create(args) => create::run(args).await,
    }
}
